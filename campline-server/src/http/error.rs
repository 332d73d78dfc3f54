//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with the service's fixed
//! body shapes: `{"error": "..."}` for not-found, a generic
//! `{"errors": ["validation errors"]}` array for validation failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str },

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => {
                // The wire format is deliberately generic; the detail
                // only goes to the log.
                tracing::debug!(error = %e, "validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "errors": ["validation errors"] }),
                )
            }
            Self::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("{} not found", resource) }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, .. } => Self::NotFound { resource },
            _ => Self::Database(e),
        }
    }
}
