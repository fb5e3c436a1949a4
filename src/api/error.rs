// src/api/error.rs
// Error taxonomy and the single boundary that turns it into HTTP responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;
use std::fmt;
use tracing::error;

use crate::llm::CompletionError;
use crate::session::SessionError;

pub const EMPTY_MESSAGE_REPLY: &str = "Hey, you didn't say anything! What's on your mind, my friend?";
pub const EMPTY_COMPLETION_REPLY: &str = "I'm here for you! Can you tell me a bit more?";
pub const COMPLETION_FAILED_REPLY: &str = "Oops, something went wrong on my end, but I'm still here for you. \
Could you try again in a moment? And if things feel really heavy right now, please reach out to someone \
you trust or a support line.";
pub const UNAVAILABLE_REPLY: &str = "I'm having trouble connecting right now, so I can't chat at the moment. \
Please try again later, and if you need support right away, reach out to someone you trust or a local \
support line.";

const QUOTES_FAILED_MESSAGE: &str = "Failed to generate quotes";
const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while processing your request. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Client sent something unusable
    #[error("{0}")]
    InvalidInput(String),

    #[error("empty message")]
    EmptyMessage,

    #[error("model returned an empty completion")]
    EmptyCompletion,

    /// Upstream call failed; detail is for logs only
    #[error("completion service unavailable: {0}")]
    CompletionUnavailable(String),

    /// Model handle could not be built at startup
    #[error("model unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl ErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::InvalidInput(_) | ErrorKind::EmptyMessage => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput(_) => "INVALID_INPUT",
            ErrorKind::EmptyMessage => "EMPTY_MESSAGE",
            ErrorKind::EmptyCompletion => "EMPTY_COMPLETION",
            ErrorKind::CompletionUnavailable(_) => "COMPLETION_UNAVAILABLE",
            ErrorKind::Unavailable(_) => "MODEL_UNAVAILABLE",
            ErrorKind::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<CompletionError> for ErrorKind {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Empty => ErrorKind::EmptyCompletion,
            other => ErrorKind::CompletionUnavailable(other.to_string()),
        }
    }
}

impl From<SessionError> for ErrorKind {
    fn from(err: SessionError) -> Self {
        ErrorKind::InternalError(err.to_string())
    }
}

/// How an error is rendered for the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// `{"error": ..., "error_code": ...}`
    Json,
    /// `{"reply": ..., "timestamp": ...}` in the chat persona's voice
    Chat,
}

#[derive(Debug)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub surface: Surface,
}

impl ApiError {
    pub fn json(kind: impl Into<ErrorKind>) -> Self {
        Self {
            kind: kind.into(),
            surface: Surface::Json,
        }
    }

    pub fn chat(kind: impl Into<ErrorKind>) -> Self {
        Self {
            kind: kind.into(),
            surface: Surface::Chat,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::json(ErrorKind::InvalidInput(message.into()))
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    /// Client-facing text. Never includes upstream or internal detail.
    pub fn public_message(&self) -> String {
        match (self.surface, &self.kind) {
            (Surface::Json, ErrorKind::InvalidInput(message)) => message.clone(),
            (Surface::Json, ErrorKind::EmptyMessage) => "message is required".to_string(),
            (Surface::Json, ErrorKind::EmptyCompletion) => QUOTES_FAILED_MESSAGE.to_string(),
            (Surface::Json, _) => GENERIC_FAILURE_MESSAGE.to_string(),
            (Surface::Chat, ErrorKind::InvalidInput(_) | ErrorKind::EmptyMessage) => {
                EMPTY_MESSAGE_REPLY.to_string()
            }
            (Surface::Chat, ErrorKind::EmptyCompletion) => EMPTY_COMPLETION_REPLY.to_string(),
            (Surface::Chat, ErrorKind::Unavailable(_)) => UNAVAILABLE_REPLY.to_string(),
            (Surface::Chat, _) => COMPLETION_FAILED_REPLY.to_string(),
        }
    }
}

impl From<ErrorKind> for ApiError {
    fn from(kind: ErrorKind) -> Self {
        ApiError::json(kind)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed ({}): {}", self.kind.error_code(), self.kind);
        }

        let body = match self.surface {
            Surface::Json => json!({
                "error": self.public_message(),
                "error_code": self.kind.error_code(),
            }),
            Surface::Chat => json!({
                "reply": self.public_message(),
                "timestamp": Utc::now().to_rfc3339(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
