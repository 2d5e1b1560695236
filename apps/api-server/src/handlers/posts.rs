//! Post handlers: feeds, authoring, editing.
//!
//! Ownership is policy, and it lives here: handlers compare the stored
//! post's author to the authenticated caller before any mutation. The
//! repository itself performs no ownership checks.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Post, PostDraft, PostPatch};
use quill_shared::dto::{CreatePostRequest, UpdatePostRequest};

use crate::handlers::{post_response, post_with_author_response};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/posts - public feed, newest first.
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let feed = state.posts.list_all().await?;
    let body: Vec<_> = feed.into_iter().map(post_with_author_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/my - the caller's posts, newest first.
pub async fn list_mine(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let feed = state.posts.list_by_author(identity.user.id).await?;
    let body: Vec<_> = feed.into_iter().map(post_with_author_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let joined = state
        .posts
        .find_with_author(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    Ok(HttpResponse::Ok().json(post_with_author_response(joined)))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title must not be empty".to_string()));
    }
    if req.content.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Content must not be empty".to_string(),
        ));
    }

    let post = state
        .posts
        .create(
            identity.user.id,
            PostDraft {
                title: req.title,
                content: req.content,
                excerpt: req.excerpt,
                cover_image: req.cover_image,
                category: req.category,
                tags: req.tags,
            },
        )
        .await?;

    tracing::info!(post_id = %post.id, author_id = %identity.user.id, "post created");

    Ok(HttpResponse::Created().json(post_response(post)))
}

/// Load the post and reject callers who do not own it.
async fn owned_post(state: &AppState, id: Uuid, identity: &Identity) -> Result<Post, AppError> {
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if post.author_id != identity.user.id {
        return Err(AppError::Forbidden);
    }

    Ok(post)
}

/// PATCH /api/posts/{id} - partial update, owner only.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    owned_post(&state, id, &identity).await?;

    let patch = PostPatch {
        title: req.title,
        content: req.content,
        excerpt: req.excerpt,
        cover_image: req.cover_image,
        category: req.category,
        tags: req.tags,
    };

    let updated = state.posts.update(id, patch).await?;

    Ok(HttpResponse::Ok().json(post_response(updated)))
}

/// DELETE /api/posts/{id} - owner only.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    owned_post(&state, id, &identity).await?;

    let removed = state.posts.delete(id).await?;
    if !removed {
        // Lost the race with another delete of the same post.
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Post deleted successfully"
    })))
}
