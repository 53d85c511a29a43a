//! Health check handler.

use axum::Json;

use crate::dto::response::HealthResponse;

/// GET /
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}
