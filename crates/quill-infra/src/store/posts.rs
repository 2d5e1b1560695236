//! In-memory content repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostDraft, PostPatch, PostWithAuthor};
use quill_core::error::StoreError;
use quill_core::ports::{PostRepository, UserRepository};

/// Post store over an async `RwLock<HashMap>`.
///
/// Author joins resolve through the injected identity store at read time;
/// a post whose author no longer resolves is dropped from joined views
/// instead of failing the whole listing.
pub struct InMemoryPostStore {
    posts: RwLock<HashMap<Uuid, Post>>,
    users: Arc<dyn UserRepository>,
}

impl InMemoryPostStore {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
            users,
        }
    }

    async fn join_author(&self, post: Post) -> Result<Option<PostWithAuthor>, StoreError> {
        let author = self.users.find_by_id(post.author_id).await?;
        Ok(author.map(|author| PostWithAuthor { post, author }))
    }
}

#[async_trait]
impl PostRepository for InMemoryPostStore {
    async fn create(&self, author_id: Uuid, draft: PostDraft) -> Result<Post, StoreError> {
        let post = Post::new(author_id, draft);

        let mut posts = self.posts.write().await;
        posts.insert(post.id, post.clone());

        tracing::debug!(post_id = %post.id, author_id = %author_id, "post created");
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StoreError> {
        let posts = self.posts.read().await;
        Ok(posts.get(&id).cloned())
    }

    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, StoreError> {
        let post = {
            let posts = self.posts.read().await;
            posts.get(&id).cloned()
        };

        match post {
            Some(post) => self.join_author(post).await,
            None => Ok(None),
        }
    }

    async fn list_all(&self) -> Result<Vec<PostWithAuthor>, StoreError> {
        let snapshot: Vec<Post> = {
            let posts = self.posts.read().await;
            posts.values().cloned().collect()
        };

        let mut feed = Vec::with_capacity(snapshot.len());
        for post in snapshot {
            if let Some(joined) = self.join_author(post).await? {
                feed.push(joined);
            }
        }

        feed.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));
        Ok(feed)
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<PostWithAuthor>, StoreError> {
        let Some(author) = self.users.find_by_id(author_id).await? else {
            return Ok(Vec::new());
        };

        let mut feed: Vec<PostWithAuthor> = {
            let posts = self.posts.read().await;
            posts
                .values()
                .filter(|p| p.author_id == author_id)
                .cloned()
                .map(|post| PostWithAuthor {
                    post,
                    author: author.clone(),
                })
                .collect()
        };

        feed.sort_by(|a, b| b.post.created_at.cmp(&a.post.created_at));
        Ok(feed)
    }

    async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Post, StoreError> {
        let mut posts = self.posts.write().await;

        let post = posts.get_mut(&id).ok_or(StoreError::NotFound)?;
        post.apply(patch);

        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut posts = self.posts.write().await;
        Ok(posts.remove(&id).is_some())
    }
}
