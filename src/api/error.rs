//! Unified API error handling.
//!
//! All errors are returned as JSON in the shape `{"error": "<code> <reason>"}`
//! with the matching HTTP status code, e.g. `{"error": "401 Unauthorized"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// The error response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Unified API error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
}

impl ApiError {
    /// Create an API error for an arbitrary status code
    pub fn new(status: StatusCode) -> Self {
        Self { status }
    }

    /// Unauthorized error (401) - no session, or credential mismatch
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED)
    }

    /// Unprocessable entity error (422) - validation failure or store conflict
    pub fn unprocessable() -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY)
    }

    /// Internal server error (500)
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The payload string, e.g. "422 Unprocessable Entity"
    fn phrase(&self) -> String {
        format!(
            "{} {}",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("Error")
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let response = ErrorResponse {
            error: self.phrase(),
        };
        (self.status, Json(response)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.phrase())
    }
}

impl std::error::Error for ApiError {}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {}", err);

        match &err {
            sqlx::Error::Database(db_err) => {
                // Constraint violations are the client's fault
                let msg = db_err.message();
                if msg.contains("UNIQUE constraint failed")
                    || msg.contains("FOREIGN KEY constraint failed")
                    || msg.contains("NOT NULL constraint failed")
                {
                    ApiError::unprocessable()
                } else {
                    ApiError::internal()
                }
            }
            _ => ApiError::internal(),
        }
    }
}
