//! Error types for the ops dashboard server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::aggregation::AggregationError;

/// Numeric error codes exposed in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    UpstreamFailure = 2,
    UpstreamTimeout = 3,
    NotFound = 4,
    BadMapping = 5,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// The sheet backend answered with an error status or an unusable body
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Sheets request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Aggregation error: {0}")]
    Aggregation(#[from] AggregationError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg.clone()),
            AppError::Upstream(msg) => {
                (StatusCode::BAD_GATEWAY, ErrorCode::UpstreamFailure, msg.clone())
            }
            AppError::Http(e) if e.is_timeout() => (
                StatusCode::GATEWAY_TIMEOUT,
                ErrorCode::UpstreamTimeout,
                "Spreadsheet backend timed out".to_string(),
            ),
            AppError::Http(_) => (
                StatusCode::BAD_GATEWAY,
                ErrorCode::UpstreamFailure,
                "Spreadsheet backend unreachable".to_string(),
            ),
            AppError::Aggregation(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::BadMapping,
                "Internal server error".to_string(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::Failure,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
