use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

use crate::types::validate::FieldError;

#[derive(Debug, ThisError)]
pub enum BrochureError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadRequest(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("missing or invalid session")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("database error: {0}")]
    Database(#[from] SqlxError),
}

impl IntoResponse for BrochureError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            BrochureError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse {
                    success: false,
                    message: "Validation error".to_string(),
                    errors: Some(errors),
                },
            ),
            BrochureError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ApiErrorResponse {
                    success: false,
                    message,
                    errors: None,
                },
            ),
            BrochureError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiErrorResponse {
                    success: false,
                    message: "Invalid credentials".to_string(),
                    errors: None,
                },
            ),
            BrochureError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ApiErrorResponse {
                    success: false,
                    message: "Unauthorized".to_string(),
                    errors: None,
                },
            ),
            BrochureError::Forbidden(message) => (
                StatusCode::FORBIDDEN,
                ApiErrorResponse {
                    success: false,
                    message: message.to_string(),
                    errors: None,
                },
            ),
            BrochureError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                ApiErrorResponse {
                    success: false,
                    message: format!("{what} not found"),
                    errors: None,
                },
            ),
            err @ (BrochureError::Json(_)
            | BrochureError::PasswordHash(_)
            | BrochureError::Database(_)) => {
                // Never leak datastore or hashing details to clients.
                error!(error = %err, "internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorResponse {
                        success: false,
                        message: "An internal error occurred".to_string(),
                        errors: None,
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// Standardized API error response body.
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}
