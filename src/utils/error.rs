//! Unified error handling
//!
//! Application error type and response structure:
//! - [`AppError`] - application error enum
//! - [`AppResponse`] - API response envelope
//!
//! # Error code scheme
//!
//! | Code | Category | HTTP |
//! |------|----------|------|
//! | E0002 | Validation failed | 400 |
//! | E0003 | Resource not found | 404 |
//! | E0006 | Invalid request | 400 |
//! | E9001 | Internal error | 500 |
//! | E9002 | Database error | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Unified API response envelope
///
/// ```json
/// {
///   "code": "E0003",
///   "message": "Order 42 not found"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse {
    pub code: String,
    pub message: String,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request rejected before touching persistence (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Referenced resource does not exist; an expected, recoverable outcome (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Malformed request, e.g. path/body identifier mismatch (400)
    #[error("Invalid request: {0}")]
    Invalid(String),

    /// Underlying store rejected a read or write (500)
    #[error("Database error: {0}")]
    Database(String),

    /// Any other unexpected failure (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.clone()),
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg.clone()),

            // 5xx: log the detail, return a generic body
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9002",
                    "Database error".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(AppResponse {
            code: code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
