//! OpenAI chat-completions client for the writing assistant.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use quill_core::error::AssistError;
use quill_core::ports::{AssistAction, AssistRequest, AssistResponse, WritingAssistant};

/// Generation service configuration.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Upper bound on generated output.
    pub max_completion_tokens: u32,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-5".to_string(),
            max_completion_tokens: 8192,
        }
    }
}

impl OpenAiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            base_url: std::env::var("OPENAI_BASE_URL").unwrap_or(defaults.base_url),
            model: std::env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            max_completion_tokens: defaults.max_completion_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Stateless pass-through to the chat-completions endpoint.
///
/// Exactly one request per call; every upstream failure collapses into
/// `AssistError::Upstream` so service internals never reach clients.
pub struct OpenAiAssistant {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiAssistant {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Instruction template for one action and tone.
    fn prompts(action: AssistAction, tone: &str, content: &str) -> (String, String) {
        match action {
            AssistAction::Improve => (
                format!(
                    "You are a professional writing editor. Improve the given text by fixing \
                     grammar, enhancing clarity, and making it more engaging. Maintain the \
                     original meaning and {tone} tone."
                ),
                format!("Please improve this text:\n\n{content}"),
            ),
            AssistAction::Expand => (
                format!(
                    "You are a creative writing assistant. Expand the given text by adding more \
                     details, examples, and depth while maintaining a {tone} tone."
                ),
                format!("Please expand this text with more details:\n\n{content}"),
            ),
            AssistAction::Summarize => (
                format!(
                    "You are a skilled summarizer. Create a concise summary of the given text \
                     while preserving key points and maintaining a {tone} tone."
                ),
                format!("Please summarize this text:\n\n{content}"),
            ),
        }
    }
}

#[async_trait]
impl WritingAssistant for OpenAiAssistant {
    async fn assist(&self, request: AssistRequest) -> Result<AssistResponse, AssistError> {
        request.validate()?;

        let (system_prompt, user_prompt) =
            Self::prompts(request.action, request.tone(), &request.content);

        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            max_completion_tokens: self.config.max_completion_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "generation request failed");
                AssistError::Upstream
            })?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "generation service returned an error");
            return Err(AssistError::Upstream);
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "malformed generation response");
            AssistError::Upstream
        })?;

        let suggestion = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(AssistResponse {
            suggestion,
            action: request.action,
        })
    }
}
