use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::domain::synthesis::SynthesisError;

/// Body returned when a failure carries no message of its own
pub const GENERIC_ERROR_BODY: &str = "Error";

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    BadRequest(String),

    #[error("无效的音频格式：{0}")]
    InvalidFormat(String),

    #[error("{0}")]
    Synthesis(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InvalidFormat(_) | Self::Synthesis(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Plain-text body sent to the caller.
    ///
    /// Internal failures never leak their detail; a synthesis failure whose
    /// underlying error had no message falls back to the generic body too.
    pub fn body(&self) -> String {
        match self {
            Self::Internal(_) => GENERIC_ERROR_BODY.to_string(),
            Self::Synthesis(msg) if msg.trim().is_empty() => GENERIC_ERROR_BODY.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<SynthesisError> for AppError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::InvalidFormat(value) => AppError::InvalidFormat(value),
            SynthesisError::Exhausted(exhausted) => {
                AppError::Synthesis(exhausted.last_error.to_string())
            }
        }
    }
}

/// Implement IntoResponse for automatic conversion in handlers
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::Forbidden | Self::BadRequest(_) => tracing::warn!(
                error = %self,
                status = %status.as_u16(),
                "Request rejected"
            ),
            _ => tracing::error!(
                error = %self,
                status = %status.as_u16(),
                "Request failed"
            ),
        }

        // &str/String bodies are served as text/plain; charset=utf-8
        (status, self.body()).into_response()
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
