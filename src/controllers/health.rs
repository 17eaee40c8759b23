use axum::{http::StatusCode, response::IntoResponse};

/// GET /health - Liveness probe, never touches the speech backend
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
