//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration.
///
/// JWT and generation-service settings are read by their own adapters
/// (`JwtTokenService::from_env`, `OpenAiConfig::from_env`); this struct
/// covers only the server socket.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }
}
