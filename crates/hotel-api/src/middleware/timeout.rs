//! Per-route-group request deadline.

use std::time::Duration;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use hotel_core::error::AppError;

use crate::error::ApiError;

/// Fails the request with 408 when the handler runs past `budget`.
pub async fn enforce_timeout(
    State(budget): State<Duration>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = request.uri().path().to_string();
    match tokio::time::timeout(budget, next.run(request)).await {
        Ok(response) => Ok(response),
        Err(_) => {
            warn!(path = %path, budget_secs = budget.as_secs(), "Request timed out");
            Err(AppError::timeout("Request timed out").into())
        }
    }
}
