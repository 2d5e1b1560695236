use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::User;

/// Post entity - a blog post owned by one author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable post fields; id and timestamps are assigned by the repository.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

/// Partial update. `None` leaves the stored field unchanged.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub cover_image: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
}

impl Post {
    /// Materialize a draft with a generated id and both timestamps set to now.
    pub fn new(author_id: Uuid, draft: PostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: draft.title,
            content: draft.content,
            excerpt: draft.excerpt,
            cover_image: draft.cover_image,
            category: draft.category,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the supplied fields and advance `updated_at`.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(cover_image) = patch.cover_image {
            self.cover_image = cover_image;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        self.updated_at = Utc::now();
    }
}

/// A post joined with its resolved author.
///
/// Not serialized directly; the handler layer maps it to a response DTO so
/// the author's password hash never leaves the process.
#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, content: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            content: content.to_string(),
            excerpt: None,
            cover_image: None,
            category: None,
            tags: vec![],
        }
    }

    #[test]
    fn new_posts_get_distinct_ids() {
        let author = Uuid::new_v4();
        let a = Post::new(author, draft("a", "a"));
        let b = Post::new(author, draft("b", "b"));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn apply_overwrites_only_supplied_fields() {
        let mut post = Post::new(Uuid::new_v4(), draft("Hello", "v1"));
        post.category = Some("rust".to_string());
        let before = post.updated_at;

        post.apply(PostPatch {
            content: Some("v2".to_string()),
            ..Default::default()
        });

        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "v2");
        assert_eq!(post.category.as_deref(), Some("rust"));
        assert!(post.updated_at > before);
    }

    #[test]
    fn apply_can_clear_optional_fields() {
        let mut post = Post::new(Uuid::new_v4(), draft("Hello", "v1"));
        post.excerpt = Some("teaser".to_string());

        post.apply(PostPatch {
            excerpt: Some(None),
            ..Default::default()
        });

        assert_eq!(post.excerpt, None);
    }
}
