use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use optia_completion::error::CompletionError;
use optia_core::error::CoreError;
use optia_storage::error::StorageError;

/// Unified API error type for the chat handler.
///
/// Every variant is reported to the client as a 500 with an `error` message;
/// the variant decides what gets logged.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or invalid request input.
    Input(String),
    NotFound(String),
    /// The completion provider answered with a non-success status.
    Upstream { status: u16, message: String },
    Storage(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<String>,
}

impl ApiError {
    pub fn message(&self) -> String {
        match self {
            ApiError::Input(msg)
            | ApiError::NotFound(msg)
            | ApiError::Storage(msg)
            | ApiError::Internal(msg) => msg.clone(),
            ApiError::Upstream { status, message } => format!("Error {status}: {message}"),
        }
    }

    /// Render the error, optionally including its debug representation.
    pub fn into_response_with_detail(self, detail: bool) -> Response {
        match &self {
            ApiError::Input(msg) | ApiError::NotFound(msg) => {
                tracing::info!("request rejected: {msg}");
            }
            ApiError::Upstream { status, message } => {
                tracing::warn!(status, "completion provider error: {message}");
            }
            ApiError::Storage(msg) => tracing::error!("storage error: {msg}"),
            ApiError::Internal(msg) => tracing::error!("internal error: {msg}"),
        }

        let body = ErrorBody {
            error: self.message(),
            stack: detail.then(|| format!("{self:?}")),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_with_detail(false)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => ApiError::NotFound(format!("object not found: {key}")),
            other => ApiError::Storage(other.to_string()),
        }
    }
}

impl From<CompletionError> for ApiError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::Upstream { status, message } => ApiError::Upstream { status, message },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Input(e.to_string())
    }
}
