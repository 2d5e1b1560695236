//! Writing-assistance port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AssistError;

/// What the assistant should do with the submitted text.
///
/// An unrecognized action fails request deserialization, so it never
/// reaches the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssistAction {
    Improve,
    Expand,
    Summarize,
}

/// A single assistance request.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistRequest {
    pub content: String,
    pub action: AssistAction,
    /// Defaults to "professional" when absent.
    pub tone: Option<String>,
}

impl AssistRequest {
    /// Reject empty input before any network traffic happens.
    pub fn validate(&self) -> Result<(), AssistError> {
        if self.content.trim().is_empty() {
            return Err(AssistError::InvalidRequest(
                "content must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tone(&self) -> &str {
        self.tone.as_deref().unwrap_or("professional")
    }
}

/// Generated suggestion, echoing the requested action.
#[derive(Debug, Clone, Serialize)]
pub struct AssistResponse {
    pub suggestion: String,
    pub action: AssistAction,
}

/// Stateless translator to an external text-generation service.
///
/// One request in, one suggestion out. No retries, no caching, and no
/// store access; implementations must not hold any lock across the call.
#[async_trait]
pub trait WritingAssistant: Send + Sync {
    async fn assist(&self, request: AssistRequest) -> Result<AssistResponse, AssistError>;
}
