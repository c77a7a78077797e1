//! API error type with `IntoResponse`.
//!
//! Errors are converted to JSON bodies with an appropriate status code.
//! Storage failures are logged and reported generically.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::storage::StorageError;

#[derive(Debug)]
pub enum ApiError {
    /// Resource not found (404)
    NotFound { resource: &'static str, id: i64 },

    /// Uniqueness, foreign key or duplicate link violation (409)
    Conflict { message: String },

    /// Any other storage failure (500, logged)
    Storage(StorageError),

    /// Internal error (500, logged)
    Internal { message: String },
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        if err.is_constraint_violation() || matches!(err, StorageError::DuplicateLink { .. }) {
            Self::Conflict {
                message: err.to_string(),
            }
        } else {
            Self::Storage(err)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{resource} {id} not found")
                }),
            ),
            Self::Conflict { message } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "conflict",
                    "message": message
                }),
            ),
            Self::Storage(e) => {
                tracing::error!(error = %e, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
            Self::Internal { message } => {
                tracing::error!(message = %message, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
