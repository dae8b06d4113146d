// JSON request body extraction

use crate::core::error::ApiError;
use crate::core::state::AppState;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// JSON body extractor with lenient content negotiation
///
/// Requests that do not declare a JSON content type, or that carry no body at
/// all, yield `T::default()` instead of being rejected. A declared JSON body
/// that fails to parse, or whose top level is neither an object nor an array,
/// is an internal error rendered according to the runtime mode.
pub struct JsonBody<T>(pub T);

impl<T> FromRequest<Arc<AppState>> for JsonBody<T>
where
    T: DeserializeOwned + Default + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let mode = state.mode();

        if !has_json_content_type(req.headers()) {
            return Ok(JsonBody(T::default()));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::internal("BodyReadError", anyhow::anyhow!(e.body_text()), mode))?;

        if bytes.is_empty() {
            return Ok(JsonBody(T::default()));
        }

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| ApiError::internal("JsonSyntaxError", e, mode))?;

        if !(value.is_object() || value.is_array()) {
            return Err(ApiError::internal(
                "JsonSyntaxError",
                anyhow::anyhow!("JSON body must be an object or an array"),
                mode,
            ));
        }

        serde_json::from_value(value)
            .map(JsonBody)
            .map_err(|e| ApiError::internal("JsonShapeError", e, mode))
    }
}

/// `application/json` and any `+json` media type
pub fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };

    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    media_type == "application/json"
        || (media_type.starts_with("application/") && media_type.ends_with("+json"))
}
