use std::fmt;
use thiserror::Error;

/// The only message ever shown to a rejected caller
pub const DENIED_MESSAGE: &str = "Denied.";

/// Authentication failure
///
/// The reason is kept for logs and tests. `Display` is fixed so that a
/// response built from it cannot tell a missing header from a bad digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Denied.")]
    AccessDenied(DenialReason),
}

impl AuthError {
    pub fn reason(&self) -> DenialReason {
        match self {
            Self::AccessDenied(reason) => *reason,
        }
    }
}

impl From<DenialReason> for AuthError {
    fn from(reason: DenialReason) -> Self {
        Self::AccessDenied(reason)
    }
}

/// Why a request was denied (internal only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    MissingHeader,
    EmptyHeader,
    MalformedHeader,
    UnsupportedAlgorithm,
    SignatureMismatch,
    UnsupportedScheme,
    MalformedCredentials,
    CredentialMismatch,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingHeader => "header is missing",
            Self::EmptyHeader => "header is empty",
            Self::MalformedHeader => "header is malformed",
            Self::UnsupportedAlgorithm => "unsupported signature algorithm",
            Self::SignatureMismatch => "signatures did not match",
            Self::UnsupportedScheme => "only basic authentication is supported",
            Self::MalformedCredentials => "credentials could not be decoded",
            Self::CredentialMismatch => "username/password mismatch",
        };
        f.write_str(text)
    }
}
