//! Error types for the endpoint adapter

use thiserror::Error;
use xuanji_application::GatewayError;

/// Result type alias for endpoint operations
pub type Result<T> = std::result::Result<T, LkeError>;

/// Errors that can occur when talking to the hosted endpoint
#[derive(Error, Debug)]
pub enum LkeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response body of {size} bytes exceeds limit {limit}")]
    BodyTooLarge { size: u64, limit: usize },

    #[error("Invalid endpoint URL '{0}'")]
    InvalidEndpoint(String),

    #[error("bot_app_key is not configured")]
    MissingBotAppKey,
}

impl From<LkeError> for GatewayError {
    fn from(err: LkeError) -> Self {
        match err {
            LkeError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            LkeError::Http(e) if e.is_connect() => GatewayError::ConnectionError(e.to_string()),
            LkeError::Http(e) if e.is_decode() || e.is_body() => {
                GatewayError::InvalidResponse(e.to_string())
            }
            LkeError::Http(e) => GatewayError::RequestFailed(e.to_string()),
            err @ LkeError::Status { .. } => GatewayError::RequestFailed(err.to_string()),
            err @ LkeError::BodyTooLarge { .. } => GatewayError::InvalidResponse(err.to_string()),
            err => GatewayError::Other(err.to_string()),
        }
    }
}
