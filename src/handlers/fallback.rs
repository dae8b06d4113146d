use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use tracing::debug;

pub async fn fallback_handler(method: Method, uri: Uri) -> Response {
    debug!(method = %method, path = %uri.path(), "No route matched");

    (
        StatusCode::NOT_FOUND,
        format!("Cannot {} {}", method, uri.path()),
    )
        .into_response()
}
