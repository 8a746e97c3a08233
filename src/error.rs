// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the edge server and the diary backend client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Edge server error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// A string outside an enum's known set of values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownValue(pub String);

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

/// Failures talking to the diary backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 401 from the backend; the credential has already been evicted.
    #[error("Session expired")]
    Unauthorized,

    /// Any other non-success status, with the user-facing notice.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text shown to the user in a toast.
    pub fn notice(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Unauthorized => failure_notice(401),
            ApiError::Network(_) | ApiError::Decode(_) => "요청에 실패했습니다.".to_string(),
        }
    }
}

/// Generic failure notice for a status code.
pub fn failure_notice(status: u16) -> String {
    format!("요청에 실패했습니다. ({})", status)
}
