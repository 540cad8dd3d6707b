//! Client for a running webhook receiver
//!
//! Used by the CLI to exercise a deployed receiver end to end.

use hookgate_core::auth;
use hookgate_core::dto::webhook::WebhookResponse;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::error::Result;
use crate::{build_http_client, endpoint, handle_response, normalize_base_url};

/// Signs payloads with the shared secret and posts them to `/trigger`
#[derive(Debug)]
pub struct ReceiverClient {
    base_url: String,
    header_name: String,
    secret: SecretString,
    client: Client,
}

impl ReceiverClient {
    /// Create a new receiver client
    ///
    /// # Arguments
    /// * `base_url` - The receiver's base URL (e.g., "http://localhost:5000")
    /// * `header_name` - The header the receiver reads the signature from
    /// * `secret` - The shared HMAC secret
    /// * `timeout` - Upper bound for each request
    pub fn new(
        base_url: impl Into<String>,
        header_name: impl Into<String>,
        secret: SecretString,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url),
            header_name: header_name.into(),
            secret,
            client: build_http_client(timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Header value that would be sent along with `body`
    pub fn signature_for(&self, body: &[u8]) -> String {
        auth::sign(self.secret.expose_secret().as_bytes(), body)
    }

    /// Sign `body` and post it to the receiver's trigger endpoint
    pub async fn trigger(&self, body: Vec<u8>) -> Result<WebhookResponse> {
        let url = endpoint(&self.base_url, &["trigger"])?;
        let signature = self.signature_for(&body);

        let response = self
            .client
            .post(url)
            .header(self.header_name.as_str(), signature)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        handle_response(response).await
    }
}
