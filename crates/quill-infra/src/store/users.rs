//! In-memory identity store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{NewUser, User};
use quill_core::error::StoreError;
use quill_core::ports::UserRepository;

/// User store over an async `RwLock<HashMap>`.
///
/// The uniqueness check and the insert happen under a single write lock so
/// two concurrent registrations of the same username cannot both succeed.
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserStore {
    async fn create(&self, candidate: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.username == candidate.username) {
            return Err(StoreError::Conflict(format!(
                "username '{}' already exists",
                candidate.username
            )));
        }

        let user = User::new(candidate);
        users.insert(user.id, user.clone());

        tracing::debug!(user_id = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }
}
