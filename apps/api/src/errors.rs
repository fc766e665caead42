use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extract::ExtractError;
use crate::llm_client::LlmError;
use crate::render::pdf::RenderError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every pipeline stage failure maps to exactly one variant here; nothing
/// below this boundary is allowed to panic the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported or corrupt upload: {0}")]
    FileFormat(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid or missing API key")]
    Authentication,

    #[error("AI service error: {0}")]
    Service(String),

    #[error("Rendering error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        AppError::FileFormat(e.to_string())
    }
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::InvalidApiKey => AppError::Authentication,
            other => AppError::Service(other.to_string()),
        }
    }
}

impl From<RenderError> for AppError {
    fn from(e: RenderError) -> Self {
        AppError::Render(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::FileFormat(msg) => {
                (StatusCode::BAD_REQUEST, "FILE_FORMAT_ERROR", msg.clone())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Authentication => (
                StatusCode::UNAUTHORIZED,
                "AUTHENTICATION_ERROR",
                "Invalid or missing API key".to_string(),
            ),
            AppError::Service(msg) => {
                tracing::error!("AI service error: {msg}");
                (StatusCode::BAD_GATEWAY, "SERVICE_ERROR", msg.clone())
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "RENDER_ERROR",
                    "PDF rendering failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
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
