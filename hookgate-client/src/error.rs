//! Error types for the Hookgate clients

use hookgate_core::ServiceError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when calling an upstream service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if the request ran past the client timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::RequestFailed(e) if e.is_timeout())
    }
}

impl From<ClientError> for ServiceError {
    fn from(err: ClientError) -> Self {
        if err.is_timeout() {
            return ServiceError::Timeout;
        }

        match err {
            ClientError::ApiError { status, message } => ServiceError::Rejected { status, message },
            ClientError::ParseError(msg) => ServiceError::InvalidResponse(msg),
            ClientError::RequestFailed(e) => ServiceError::Unavailable(e.to_string()),
            ClientError::InvalidRequest(msg) => ServiceError::Unavailable(msg),
        }
    }
}
