//! API error handling
//!
//! Every failure is rendered as JSON `{ error, code, detail }`.

use ai_speech::{ErrorKind, SpeechError};
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Transcoding failed: {0}")]
    Transcode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Transcode(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message, detail) = match self {
            Self::BadRequest(msg) => ("bad_request", "Invalid request", msg),
            Self::PayloadTooLarge(msg) => ("payload_too_large", "Request body too large", msg),
            Self::ServiceUnavailable(msg) => {
                ("service_unavailable", "Speech synthesis unavailable", msg)
            },
            Self::Transcode(msg) => ("transcode_failed", "Audio transcoding failed", msg),
            Self::Internal(msg) => ("internal_error", "An internal error occurred", msg),
        };

        let body = ErrorResponse {
            error: message.to_string(),
            code: code.to_string(),
            detail: Some(detail),
        };

        (status, Json(body)).into_response()
    }
}

impl From<SpeechError> for ApiError {
    fn from(err: SpeechError) -> Self {
        let detail = err.to_string();
        match err.kind() {
            ErrorKind::InvalidInput => Self::BadRequest(detail),
            ErrorKind::ProviderUnavailable
            | ErrorKind::ProviderError
            | ErrorKind::AllProvidersFailed => Self::ServiceUnavailable(detail),
            ErrorKind::Transcode => Self::Transcode(detail),
            ErrorKind::Internal => Self::Internal(detail),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(rejection.body_text())
        } else {
            Self::BadRequest(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
