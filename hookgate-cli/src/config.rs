//! Configuration module
//!
//! Handles CLI configuration including service URLs and the shared secret.

use anyhow::Result;
use secrecy::SecretString;
use std::time::Duration;

/// CLI configuration
#[derive(Debug)]
pub struct Config {
    /// URL of the webhook receiver
    pub receiver_url: String,
    /// URL of the pipeline service
    pub service_url: String,
    /// Header carrying the signature
    pub header_name: String,
    /// Shared HMAC secret, needed only for signing
    pub secret: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Config {
    /// The shared secret, or an error naming how to provide it
    pub fn require_secret(&self) -> Result<&SecretString> {
        self.secret
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("No secret given: pass --secret or set HMAC_TOKEN"))
    }
}
