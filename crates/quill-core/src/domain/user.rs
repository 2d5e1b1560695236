use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - an author account.
///
/// Immutable after registration. `password_hash` is an argon2 PHC string
/// and must never reach a client; serialize through a profile DTO instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub display_name: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable user record - everything but the generated id and timestamp.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub display_name: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}

impl User {
    /// Materialize a registration with a generated id.
    pub fn new(candidate: NewUser) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: candidate.username,
            display_name: candidate.display_name,
            password_hash: candidate.password_hash,
            bio: candidate.bio,
            avatar: candidate.avatar,
            created_at: Utc::now(),
        }
    }
}
