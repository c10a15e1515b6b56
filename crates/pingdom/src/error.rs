//! Error types for the Pingdom client

use crate::envelope::ApiError;

/// Errors that can occur when talking to the Pingdom API
#[derive(Debug, thiserror::Error)]
pub enum PingdomError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed error response (HTTP {status}): {source}")]
    MalformedErrorResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PingdomError {
    /// The server rejected the request with a well-formed error envelope
    pub fn is_api_error(&self) -> bool {
        matches!(self, PingdomError::Api(_))
    }

    /// A response body could not be decoded, whatever its status
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            PingdomError::Json(_) | PingdomError::MalformedErrorResponse { .. }
        )
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            PingdomError::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for Pingdom operations
pub type Result<T> = std::result::Result<T, PingdomError>;
