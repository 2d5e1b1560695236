//! HTTP handlers and route configuration.

mod assist;
mod auth;
mod health;
mod posts;

#[cfg(test)]
mod tests;

use actix_web::web;

use quill_core::domain::{Post, PostWithAuthor, User};
use quill_shared::dto::{PostResponse, PostWithAuthorResponse, UserResponse};

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Post routes; "/my" is registered before "/{id}" so it is not
            // swallowed by the id matcher.
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/my", web::get().to(posts::list_mine))
                    .route("/{id}", web::get().to(posts::get))
                    .route("/{id}", web::patch().to(posts::update))
                    .route("/{id}", web::delete().to(posts::delete)),
            )
            // AI assistance
            .service(web::scope("/ai").route("/assist", web::post().to(assist::assist))),
    );
}

/// Public profile view of a user; strips the password hash.
pub(crate) fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        display_name: user.display_name.clone(),
        bio: user.bio.clone(),
        avatar: user.avatar.clone(),
        created_at: user.created_at,
    }
}

pub(crate) fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        title: post.title,
        content: post.content,
        excerpt: post.excerpt,
        cover_image: post.cover_image,
        category: post.category,
        tags: post.tags,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

pub(crate) fn post_with_author_response(joined: PostWithAuthor) -> PostWithAuthorResponse {
    let author = user_response(&joined.author);
    PostWithAuthorResponse {
        post: post_response(joined.post),
        author,
    }
}
