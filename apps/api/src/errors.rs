use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Content-shape failures are not errors; they surface as a soft
/// `GenerationOutcome::NoUsableIdeas`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream error: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Non-standard "client closed request" status.
const CLIENT_CLOSED_REQUEST: u16 = 499;

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        let status = err.upstream_status();
        match err {
            LlmError::Cancelled => AppError::Cancelled,
            LlmError::Api { status, message } => AppError::Upstream {
                status: Some(status),
                message: format!("OpenAI error {status}: {message}"),
            },
            other => AppError::Upstream {
                status,
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, upstream_status) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone(), None)
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    msg.clone(),
                    None,
                )
            }
            AppError::Upstream { status, message } => {
                tracing::error!("Upstream error: {message}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    message.clone(),
                    *status,
                )
            }
            AppError::Cancelled => (
                StatusCode::from_u16(CLIENT_CLOSED_REQUEST).unwrap_or(StatusCode::BAD_REQUEST),
                "CANCELLED",
                "Request was cancelled".to_string(),
                None,
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut body = json!({
            "error": message,
            "code": code,
        });
        if let Some(s) = upstream_status {
            body["upstream_status"] = json!(s);
        }

        (status, Json(body)).into_response()
    }
}
