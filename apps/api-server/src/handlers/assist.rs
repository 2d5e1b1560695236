//! AI writing-assistance handler.

use actix_web::{HttpResponse, web};

use quill_core::ports::AssistRequest;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/ai/assist - Protected route
///
/// The adapter validates the request and performs exactly one upstream
/// call; failures surface as an opaque 502.
pub async fn assist(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<AssistRequest>,
) -> AppResult<HttpResponse> {
    let response = state.assistant.assist(body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
