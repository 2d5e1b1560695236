use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewUser, Post, PostDraft, PostPatch, PostWithAuthor, User};
use crate::error::StoreError;

/// Identity store. Users are created once and never updated or deleted.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user under a freshly generated id.
    ///
    /// Fails with `StoreError::Conflict` if the username is already taken
    /// (case-sensitive); the store is left unchanged in that case.
    async fn create(&self, candidate: NewUser) -> Result<User, StoreError>;

    /// Look up a user by id. A missing id is `Ok(None)`.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Look up a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// Content repository. Owns post records and their author joins.
///
/// Ownership is deliberately NOT checked here: `update` and `delete` operate
/// on whatever id they are given, and the handler layer is responsible for
/// comparing the post's author to the caller first.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Store a draft under a fresh id with both timestamps set to now.
    ///
    /// The caller guarantees `author_id` names an existing user.
    async fn create(&self, author_id: Uuid, draft: PostDraft) -> Result<Post, StoreError>;

    /// Raw record without the author join. A missing id is `Ok(None)`.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError>;

    /// Record joined with its author; `Ok(None)` if either is absent.
    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, StoreError>;

    /// Every post joined with its author, newest first. Posts whose author
    /// cannot be resolved are omitted.
    async fn list_all(&self) -> Result<Vec<PostWithAuthor>, StoreError>;

    /// One author's posts, newest first; an unknown author yields an empty
    /// list rather than an error.
    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<PostWithAuthor>, StoreError>;

    /// Merge the supplied fields onto the stored record and advance its
    /// modification timestamp. Fails with `StoreError::NotFound` if no post
    /// exists at `id`.
    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, StoreError>;

    /// Remove the record if present. Returns whether a removal occurred;
    /// a missing id is `Ok(false)`, not an error.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
