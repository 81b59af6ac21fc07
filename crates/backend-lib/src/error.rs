// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use credgate_common::ErrorResponse;
use thiserror::Error;

use crate::auth::AuthFailure;

/// Errors surfaced at the HTTP boundary
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::InvalidInput(_) | AppError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "AUTH_001",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::MalformedBody(_) => "VAL_002",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Message safe to hand back to a caller
    pub fn sanitized_message(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "Invalid username or password",
            AppError::InvalidInput(_) => "Username and password are required",
            AppError::MalformedBody(_) => "Invalid request format",
            AppError::Internal(_) => "Internal server error",
        }
    }
}

impl From<AuthFailure> for AppError {
    fn from(cause: AuthFailure) -> Self {
        AppError::Internal(cause.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }

        // Details stay in the logs; callers only see the sanitized message
        let body = ErrorResponse::new(self.sanitized_message());
        (status, Json(body)).into_response()
    }
}
