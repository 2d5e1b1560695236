//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    PasswordService, PostRepository, TokenService, UserRepository, WritingAssistant,
};
use quill_infra::assist::{OpenAiAssistant, OpenAiConfig};
use quill_infra::auth::{Argon2PasswordService, JwtTokenService};
use quill_infra::store::{InMemoryPostStore, InMemoryUserStore};

/// Shared application state.
///
/// Stores are constructed once at startup and owned here; handlers receive
/// them by injection instead of reaching for globals.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub assistant: Arc<dyn WritingAssistant>,
}

impl AppState {
    /// Wire the in-memory stores and service adapters together.
    pub fn new(tokens: Arc<dyn TokenService>, assistant: Arc<dyn WritingAssistant>) -> Self {
        let users: Arc<InMemoryUserStore> = Arc::new(InMemoryUserStore::new());
        let posts = Arc::new(InMemoryPostStore::new(users.clone()));

        Self {
            users,
            posts,
            tokens,
            passwords: Arc::new(Argon2PasswordService::new()),
            assistant,
        }
    }

    /// Build the state from environment configuration.
    pub fn from_env() -> Self {
        let state = Self::new(
            Arc::new(JwtTokenService::from_env()),
            Arc::new(OpenAiAssistant::new(OpenAiConfig::from_env())),
        );
        tracing::info!("Application state initialized (in-memory stores)");
        state
    }
}
