//! Writing-assistance adapter backed by an OpenAI-compatible API.

mod openai;

pub use openai::{OpenAiAssistant, OpenAiConfig};
