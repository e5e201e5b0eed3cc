//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::portal::PortalError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Missing or rejected credentials
    Unauthorized(String),
    /// The portal failed or answered with garbage
    Upstream(PortalError),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, ApiError::new("UNAUTHORIZED", msg))
            }
            AppError::Upstream(e) => {
                error!(error = %e, "portal request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    ApiError::new("UPSTREAM_ERROR", e.to_string()),
                )
            }
            AppError::Internal(msg) => {
                error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::new("INTERNAL_ERROR", msg),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortalError> for AppError {
    fn from(err: PortalError) -> Self {
        if err.is_upstream() {
            return AppError::Upstream(err);
        }
        match err {
            PortalError::Configuration(msg) => AppError::Internal(msg),
            // Only NotFound is left once upstream failures are handled.
            other => AppError::NotFound(other.to_string()),
        }
    }
}
