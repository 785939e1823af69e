//! API error handling.
//!
//! Every failing procedure answers with a status code and an [`ApiError`]
//! body. Storage details never reach the client.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tasklist_core::errors::{CoreError, FieldError};
use tasklist_core::procedures::codes::{INTERNAL_ERROR, NOT_FOUND};
use tasklist_core::responses::ApiError;
use tasklist_db::error::DatabaseError;

/// Status code plus body, returned from handlers as the `Err` side.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    pub status: StatusCode,
    pub error: ApiError,
}

impl ApiErrorResponse {
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// 400 with field-level details.
    #[must_use]
    pub fn validation_error(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ApiError::validation(message, details),
        )
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new(NOT_FOUND, message))
    }

    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new(INTERNAL_ERROR, message),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<DatabaseError> for ApiErrorResponse {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Core(CoreError::Validation(details)) => {
                Self::validation_error("Validation failed", details)
            }
            DatabaseError::Core(err @ CoreError::NotFound { .. }) => Self::not_found(err.to_string()),
            other => {
                tracing::error!(error = %other, "task procedure failed");
                Self::internal_error("An internal error occurred")
            }
        }
    }
}

/// Malformed or mistyped request bodies are reported as validation failures.
impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation_error(
            "Malformed request body",
            vec![FieldError::new("body", rejection.body_text())],
        )
    }
}
