//! Authentication handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::NewUser;
use quill_shared::dto::{AuthResponse, LoginRequest, RegisterRequest};

use crate::handlers::user_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn validate_registration(req: &RegisterRequest) -> Result<(), AppError> {
    let username = req.username.trim();
    if username.len() < 3 || username.len() > 32 {
        return Err(AppError::BadRequest(
            "Username must be between 3 and 32 characters".to_string(),
        ));
    }
    if req.password.len() < 6 {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    if req.display_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Display name must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate_registration(&req)?;

    let password_hash = state
        .passwords
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // Uniqueness is enforced inside the store; a duplicate surfaces as 409.
    let user = state
        .users
        .create(NewUser {
            username: req.username.trim().to_string(),
            display_name: req.display_name.trim().to_string(),
            password_hash,
            bio: req.bio,
            avatar: req.avatar,
        })
        .await?;

    let token = state
        .tokens
        .issue(user.id)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok(HttpResponse::Created().json(AuthResponse {
        user: user_response(&user),
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds() as u64,
    }))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Unknown username and wrong password are indistinguishable to callers.
    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = state
        .passwords
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = state
        .tokens
        .issue(user.id)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        user: user_response(&user),
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds() as u64,
    }))
}

/// GET /api/auth/me - Protected route
pub async fn me(identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(user_response(&identity.user)))
}
