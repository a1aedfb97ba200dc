use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::pdf::RasterError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl From<RasterError> for AppError {
    fn from(err: RasterError) -> Self {
        match err {
            RasterError::NotAPdf | RasterError::NoPages | RasterError::Load(_) => {
                AppError::UnprocessableEntity(err.to_string())
            }
            other => AppError::Pdf(other.to_string()),
        }
    }
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::UnprocessableEntity(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE_ENTITY")
            }
            AppError::Multipart(e) => (e.status(), "MULTIPART_ERROR"),
            AppError::Llm(_) => (StatusCode::INTERNAL_SERVER_ERROR, "LLM_ERROR"),
            AppError::Pdf(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PDF_ERROR"),
            AppError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TEMPLATE_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Validation(msg) | AppError::UnprocessableEntity(msg) => msg.clone(),
            AppError::Multipart(e) => e.body_text(),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                "An AI processing error occurred".to_string()
            }
            AppError::Pdf(msg) => {
                tracing::error!("PDF error: {msg}");
                "The resume could not be converted".to_string()
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {e:#}");
                "The page could not be rendered".to_string()
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
