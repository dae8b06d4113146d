use crate::core::body::JsonBody;
use axum::{http::StatusCode, response::IntoResponse};
use serde_json::Value;
use tracing::info;

/// GET /
pub async fn root_handler() -> impl IntoResponse {
    (StatusCode::OK, "A GET request.")
}

/// Log whatever JSON was posted and acknowledge it
///
/// POST /
pub async fn echo_handler(JsonBody(body): JsonBody<Value>) -> impl IntoResponse {
    info!(body = %body, "POST request received");

    (StatusCode::OK, "POST request received.")
}
