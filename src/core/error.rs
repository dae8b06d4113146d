// Centralized error handling for the registry

use crate::core::config::RuntimeMode;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error};

/// Registration fields that take part in validation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
    FavoriteClub,
}

impl Field {
    /// JSON key of the field
    pub fn key(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
            Field::FavoriteClub => "favoriteClub",
        }
    }

    /// Human readable label used in error messages
    pub fn label(&self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::Password => "Password",
            Field::FavoriteClub => "favorite Club",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// First rule a registration payload violated
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{} required", .0.label())]
    MissingField(Field),

    #[error("{} must be a string", .0.label())]
    InvalidType(Field),

    #[error("{} must be between {min} and {max} characters", .field.label())]
    LengthOutOfRange { field: Field, min: usize, max: usize },

    #[error("Password must be contain at least one digit")]
    PasswordPolicyViolation,

    #[error("Not a valid club")]
    InvalidEnumValue(Field),
}

/// Errors returned by the HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User not found")]
    NotFound(String),

    #[error("{cause}")]
    Internal {
        kind: &'static str,
        cause: anyhow::Error,
        mode: RuntimeMode,
    },
}

impl ApiError {
    pub fn internal(kind: &'static str, cause: impl Into<anyhow::Error>, mode: RuntimeMode) -> Self {
        ApiError::Internal {
            kind,
            cause: cause.into(),
            mode,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(e) => {
                debug!(error = %e, "Registration rejected");
                (StatusCode::BAD_REQUEST, e.to_string()).into_response()
            }
            ApiError::NotFound(id) => {
                debug!(user_id = %id, "User not found");
                (StatusCode::NOT_FOUND, "User not found").into_response()
            }
            ApiError::Internal { kind, cause, mode } => {
                internal_error_response(kind, &format!("{cause}"), &format!("{cause:#}"), mode)
            }
        }
    }
}

/// Build the 500 response shared by handler failures and caught panics.
///
/// Production mode hides everything but a fixed message; development mode echoes
/// the error text and its cause chain back to the caller.
pub fn internal_error_response(kind: &str, message: &str, detail: &str, mode: RuntimeMode) -> Response {
    error!(kind = kind, error = %detail, "Unhandled error while processing request");

    let body = if mode.is_production() {
        json!({ "error": { "message": "server error" } })
    } else {
        json!({
            "message": message,
            "error": {
                "type": kind,
                "detail": detail,
            },
        })
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
