//! Error types for the PDF Narrator server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::pdf::ExtractionError;
use crate::summarize::SummarizeError;
use crate::tts::SynthesisError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
///
/// The `Display` text is what clients see in the `error` field.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// A required external service has no credentials
    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("Failed to generate summary: {0}")]
    Upstream(String),

    #[error("Failed to extract text")]
    Extraction(#[from] ExtractionError),

    #[error("Failed to generate audio")]
    Synthesis(#[from] SynthesisError),

    /// Public message plus the underlying cause for the log
    #[error("{message}")]
    Internal { message: String, cause: String },
}

impl AppError {
    pub fn internal(message: &str, cause: impl std::fmt::Display) -> Self {
        AppError::Internal {
            message: message.to_string(),
            cause: cause.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable(_)
            | AppError::Upstream(_)
            | AppError::Extraction(_)
            | AppError::Synthesis(_)
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SummarizeError> for AppError {
    fn from(err: SummarizeError) -> Self {
        match err {
            SummarizeError::NotConfigured => {
                AppError::ServiceUnavailable("AI Service not configured on server".to_string())
            }
            SummarizeError::Upstream(detail) => AppError::Upstream(detail),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Extraction(e) => tracing::error!("Extraction error: {}", e),
            AppError::Synthesis(e) => tracing::error!("Synthesis error: {}", e),
            AppError::Upstream(detail) => tracing::error!("Upstream error: {}", detail),
            AppError::ServiceUnavailable(msg) => tracing::error!("Service unavailable: {}", msg),
            AppError::Internal { message, cause } => {
                tracing::error!("Internal error: {}: {}", message, cause)
            }
            AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                tracing::debug!(status = %status, "Request rejected: {}", msg)
            }
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
