//! Error responses shared by every route.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::handlers::assessment::SubmissionError;
use crate::application::handlers::engagement::{EmailError, TrackEventError};
use crate::domain::foundation::ErrorCode;

/// Standard error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Everything a route can answer with besides success.
#[derive(Debug)]
pub enum ApiError {
    /// Client input problem, answered with 400.
    BadRequest { code: ErrorCode, message: String },
}

impl ApiError {
    pub fn bad_request(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code,
            message: message.into(),
        }
    }
}

impl From<SubmissionError> for ApiError {
    fn from(err: SubmissionError) -> Self {
        ApiError::bad_request(err.code(), err.to_string())
    }
}

impl From<EmailError> for ApiError {
    fn from(err: EmailError) -> Self {
        ApiError::bad_request(err.code(), err.to_string())
    }
}

impl From<TrackEventError> for ApiError {
    fn from(err: TrackEventError) -> Self {
        ApiError::bad_request(err.code(), err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(
            ErrorCode::ValidationFailed,
            format!("Invalid request body: {}", rejection.body_text()),
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest { code, message } => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(code.to_string(), message)),
            )
                .into_response(),
        }
    }
}
