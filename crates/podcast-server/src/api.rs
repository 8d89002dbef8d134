//! Error types shared by the HTTP handlers.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use podcast_script::ScriptError;
use podcast_store::StoreError;
use podcast_types::ErrorResponse;
use podcast_voice::VoiceError;
use thiserror::Error;

/// Body of the `400` returned when `persons` or `turns` is missing or empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields: persons and turns";

/// Status and message for a body the JSON extractor refused. Oversized
/// bodies keep `413`; anything else that fails to parse is a `400`.
pub fn body_rejection(rejection: &JsonRejection) -> (StatusCode, String) {
    let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        StatusCode::PAYLOAD_TOO_LARGE
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, format!("Invalid request body: {}", rejection.body_text()))
}

/// Failure of a podcast generation request.
///
/// `InvalidRequest` is the caller's fault and answers `400`, `Body` answers
/// with the rejection's status. Everything else answers `500` with the error
/// text in `message`.
#[derive(Debug, Error)]
pub enum PodcastError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{message}")]
    Body { status: StatusCode, message: String },
    #[error(transparent)]
    Voice(VoiceError),
    #[error(transparent)]
    Publish(#[from] StoreError),
}

impl From<VoiceError> for PodcastError {
    fn from(err: VoiceError) -> Self {
        match err {
            VoiceError::InvalidRequest(msg) => PodcastError::InvalidRequest(msg),
            other => PodcastError::Voice(other),
        }
    }
}

impl IntoResponse for PodcastError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            PodcastError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: msg,
                    message: None,
                },
            ),
            PodcastError::Body { status, message } => (
                status,
                ErrorResponse {
                    error: message,
                    message: None,
                },
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Failed to generate podcast".to_string(),
                    message: Some(other.to_string()),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// API error type for the ancillary endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("{message}")]
    Body { status: StatusCode, message: String },
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("{0}")]
    Generation(#[from] ScriptError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: msg,
                    message: None,
                },
            ),
            ApiError::Body { status, message } => (
                status,
                ErrorResponse {
                    error: message,
                    message: None,
                },
            ),
            ApiError::ServiceUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse {
                    error: msg,
                    message: None,
                },
            ),
            ApiError::Generation(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "Failed to generate turn".to_string(),
                    message: Some(err.to_string()),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}
