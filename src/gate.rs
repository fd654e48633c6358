use axum::{extract::{Request, State}, middleware::Next, response::{IntoResponse, Response}};
use tracing::warn;

use crate::{thoughts::Thoughts, AppError};

/// Turns every request away with a 503 while the store is down.
pub async fn require_store(
    State(thoughts): State<Thoughts>,
    request: Request,
    next: Next,
) -> Response {
    if !thoughts.is_ready() {
        warn!("store unavailable, refusing {} {}", request.method(), request.uri());
        return AppError::Unavailable.into_response();
    }

    next.run(request).await
}
