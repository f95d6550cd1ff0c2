use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The wire format is a bare `{"detail": "..."}` object. Client-class
/// failures (bad input, unusable document) keep their specific messages;
/// server-class failures are logged in full and surfaced with the message
/// embedded in `detail` — never a stack trace.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Could not extract text")]
    EmptyDocument,

    #[error("Document extraction failed: {0}")]
    Extraction(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Rewraps server-class failures with an operation-specific message
    /// ("Analysis failed", "File analysis failed", ...) before they surface.
    /// Client-class failures pass through untouched so their status mapping
    /// and wording survive.
    pub fn prefixed(self, operation: &str) -> Self {
        match self {
            AppError::Llm(msg) => AppError::Llm(format!("{operation}: {msg}")),
            AppError::Internal(err) => AppError::Llm(format!("{operation}: {err}")),
            other => other,
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFormat(ext) => AppError::UnsupportedFormat(ext),
            ExtractError::Parse(msg) => AppError::Extraction(msg),
            ExtractError::Io(e) => AppError::Internal(anyhow::Error::new(e)),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::Llm(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UnsupportedFormat(ext) => (
                StatusCode::BAD_REQUEST,
                format!("Unsupported file type: {ext}"),
            ),
            AppError::EmptyDocument => (
                StatusCode::BAD_REQUEST,
                "Could not extract text".to_string(),
            ),
            AppError::Extraction(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Document extraction failed: {msg}"),
            ),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };

        let body = Json(json!({ "detail": detail }));

        (status, body).into_response()
    }
}
