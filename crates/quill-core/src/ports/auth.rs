//! Authentication ports.

use uuid::Uuid;

/// Claims carried by a bearer token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub exp: i64,
}

/// Token codec: issue and verify signed bearer tokens.
pub trait TokenService: Send + Sync {
    /// Sign a token embedding the subject id and an expiry.
    fn issue(&self, user_id: Uuid) -> Result<String, AuthError>;

    /// Verify integrity and expiry, returning the embedded claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of freshly issued tokens, in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
///
/// The gate collapses every variant into one uniform "unauthenticated"
/// response; the variants exist for logging, not for clients.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Token subject no longer exists")]
    UnknownSubject,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
