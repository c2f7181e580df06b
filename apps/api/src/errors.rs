use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::documents::DocumentError;
use crate::llm_client::LlmError;

pub const INVALID_JSON_MESSAGE: &str = "Response is not valid JSON.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Renders as `{"error": "..."}`; see [`Envelope`] for the `success`-flagged shape.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("{0}")]
    Upstream(String),

    #[error("LLM error: {0}")]
    Llm(LlmError),

    #[error("{message}")]
    MalformedModelOutput {
        message: &'static str,
        attempted_response: Option<String>,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid_json() -> Self {
        AppError::MalformedModelOutput {
            message: INVALID_JSON_MESSAGE,
            attempted_response: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream(_) | AppError::Llm(_) => StatusCode::BAD_GATEWAY,
            AppError::MalformedModelOutput { .. } | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Model output that fails to parse is reported as malformed JSON; every other
/// completion failure is an upstream error.
impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(_) => AppError::invalid_json(),
            other => AppError::Llm(other),
        }
    }
}

impl From<DocumentError> for AppError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Extract(_) | DocumentError::Join(_) => AppError::UnprocessableEntity(
                format!("Failed to extract text from PDF: {err}"),
            ),
            _ => AppError::Upstream(format!("Failed to download PDF: {err}")),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                json!({ "error": format!("AI service error: {e}") })
            }
            AppError::Upstream(msg) => {
                tracing::warn!("Upstream error: {msg}");
                json!({ "error": msg })
            }
            AppError::MalformedModelOutput {
                message,
                attempted_response,
            } => {
                tracing::error!("Model returned malformed JSON");
                let mut body = json!({ "error": message });
                if let Some(raw) = attempted_response {
                    body["attempted_response"] = Value::String(raw.clone());
                }
                body
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                json!({ "error": "An internal server error occurred" })
            }
            AppError::Validation(msg) | AppError::UnprocessableEntity(msg) => {
                json!({ "error": msg })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Error wrapper for endpoints that answer with a `success` flag.
///
/// Validation failures render as `400 {"success": false, "error": msg}`; everything
/// else as `500 {"success": false, "error": "Internal server error", "details": ...}`.
#[derive(Debug)]
pub struct Envelope(pub AppError);

impl From<AppError> for Envelope {
    fn from(err: AppError) -> Self {
        Envelope(err)
    }
}

impl From<LlmError> for Envelope {
    fn from(err: LlmError) -> Self {
        Envelope(AppError::Llm(err))
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": msg })),
            )
                .into_response(),
            other => {
                let details = match &other {
                    AppError::Internal(e) => format!("{e:#}"),
                    e => e.to_string(),
                };
                tracing::error!("Request failed: {details}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": "Internal server error",
                        "details": details
                    })),
                )
                    .into_response()
            }
        }
    }
}
