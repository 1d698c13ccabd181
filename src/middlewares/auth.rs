use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{types::app_state::AppState, utils::app_error::AppError};

/// Rejects requests whose `authorization` header does not match the
/// configured key. Without a key every request passes.
pub async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(ref auth_key) = state.auth_key else {
        return Ok(next.run(request).await);
    };

    match headers.get("authorization") {
        Some(header) if header == auth_key => Ok(next.run(request).await),
        _ => {
            warn!("Rejected unauthorized request to {}", request.uri().path());
            Err(AppError::new(StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }
}
