//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`: in-memory
//! stores, argon2 password hashing, JWT tokens, and the OpenAI-backed
//! writing assistant.

pub mod assist;
pub mod auth;
pub mod store;

pub use assist::{OpenAiAssistant, OpenAiConfig};
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use store::{InMemoryPostStore, InMemoryUserStore};
