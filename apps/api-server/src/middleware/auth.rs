//! Authentication gate: bearer-token extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use quill_core::domain::User;
use quill_core::ports::AuthError;
use quill_shared::ErrorResponse;

use crate::state::AppState;

/// Authenticated caller, resolved against the identity store.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.user.username)
/// }
/// ```
///
/// Extraction verifies the token's signature and expiry, then confirms the
/// embedded subject still exists. A token for a vanished user is as invalid
/// as a forged one.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user: User,
}

/// Gate failure. The cause is logged but clients always see the same
/// 401 body, whatever step failed.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        tracing::debug!(reason = %self.0, "authentication rejected");
        actix_web::HttpResponse::build(self.status_code()).json(ErrorResponse::unauthorized())
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("non-ascii authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::to_string)
        .ok_or_else(|| AuthError::InvalidToken("expected Bearer token".to_string()))
}

impl FromRequest for Identity {
    type Error = AuthenticationError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| {
                    tracing::error!("AppState not found in app data");
                    AuthenticationError(AuthError::InvalidToken(
                        "server configuration error".to_string(),
                    ))
                })?
                .clone();

            let token = bearer_token(&req).map_err(AuthenticationError)?;

            let claims = state.tokens.verify(&token).map_err(AuthenticationError)?;

            let user = state
                .users
                .find_by_id(claims.user_id)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "identity lookup failed during authentication");
                    AuthenticationError(AuthError::UnknownSubject)
                })?
                .ok_or(AuthenticationError(AuthError::UnknownSubject))?;

            Ok(Identity { user })
        })
    }
}
