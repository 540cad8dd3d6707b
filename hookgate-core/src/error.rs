//! Errors raised by the external collaborators (pipeline service, secret store)

use thiserror::Error;

/// Failure talking to an upstream service
///
/// Propagated unrecovered to the caller; nothing in the core retries.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request did not complete within the configured timeout
    #[error("upstream request timed out")]
    Timeout,

    /// The service could not be reached
    #[error("upstream service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with an error status
    #[error("upstream rejected request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The service answered with a body we could not understand
    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Check if this error is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
