use crate::core::body::JsonBody;
use crate::core::error::ApiError;
use crate::core::state::AppState;
use crate::validation::registration::RegistrationPayload;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Register a new user
///
/// POST /user
pub async fn create_user_handler(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<RegistrationPayload>,
) -> Result<Response, ApiError> {
    let user = payload.validate()?;

    let record = state.users.create(user);

    info!(
        user_id = %record.id,
        username = %record.username,
        favorite_club = %record.favorite_club,
        total_users = state.users.len(),
        "User registered"
    );

    Ok((StatusCode::OK, "All validation passed!").into_response())
}

/// Remove a user
///
/// DELETE /user/{id}
pub async fn delete_user_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Response, ApiError> {
    // Ids are matched exactly as listed: lower-case, hyphenated
    let Some(id) = Uuid::parse_str(&user_id)
        .ok()
        .filter(|id| id.hyphenated().to_string() == user_id)
    else {
        return Err(ApiError::NotFound(user_id));
    };

    if !state.users.delete_by_id(id) {
        return Err(ApiError::NotFound(user_id));
    }

    info!(user_id = %id, total_users = state.users.len(), "User deleted");

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// List every registered user in registration order
///
/// GET /user
pub async fn list_users_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.users.list())
}
