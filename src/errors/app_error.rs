use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::core::ssml::MarkupError;
use crate::core::tts::TTSError;
use crate::core::validation::ValidationError;

/// Error codes for structured error responses
pub mod error_codes {
    pub const INVALID_PARAMETER: &str = "invalid_parameter";
    pub const INVALID_SSML: &str = "invalid_ssml";
    pub const RATE_LIMITED: &str = "rate_limited";
    pub const UPSTREAM_FAILURE: &str = "upstream_failure";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// Message sent with every 429.
pub const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again later.";

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A request parameter is missing, malformed or out of range
    #[error("{0}")]
    InvalidParameter(String),

    /// Caller-supplied SSML failed the structural or size check
    #[error(transparent)]
    MarkupValidation(#[from] MarkupError),

    #[error("{}", RATE_LIMIT_MESSAGE)]
    RateLimited,

    /// The speech upstream failed or returned garbage
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for structured error responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidParameter(_) => error_codes::INVALID_PARAMETER,
            AppError::MarkupValidation(_) => error_codes::INVALID_SSML,
            AppError::RateLimited => error_codes::RATE_LIMITED,
            AppError::Upstream(_) => error_codes::UPSTREAM_FAILURE,
            AppError::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidParameter(_) | AppError::MarkupValidation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Log the error at the appropriate level
    pub fn log(&self) {
        match self {
            AppError::InvalidParameter(msg) => tracing::warn!("Bad request: {}", msg),
            AppError::MarkupValidation(err) => tracing::warn!("Rejected SSML: {}", err),
            AppError::RateLimited => tracing::warn!("Rate limit exceeded"),
            AppError::Upstream(msg) => tracing::error!("Upstream failure: {}", msg),
            AppError::Internal(msg) => tracing::error!("Internal server error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let body = Json(json!({
            "error": self.error_code(),
            "message": self.to_string()
        }));

        (self.status_code(), body).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::InvalidParameter(err.to_string())
    }
}

impl From<TTSError> for AppError {
    fn from(err: TTSError) -> Self {
        match err {
            TTSError::InvalidConfiguration(msg) => AppError::Internal(msg),
            other => AppError::Upstream(other.to_string()),
        }
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
