//! Hookgate HTTP Clients
//!
//! reqwest-based clients for the services around the webhook receiver:
//!
//! - [`PipelineServiceClient`]: the pipeline orchestration service
//!   (implements [`hookgate_core::PipelineService`])
//! - [`SecretStoreClient`]: the secret-parameter store
//!   (implements [`hookgate_core::SecretStore`])
//! - [`ReceiverClient`]: signs a payload and posts it to a running receiver
//!
//! Every client is built with a bounded request timeout.
//!
//! # Example
//!
//! ```no_run
//! use hookgate_client::PipelineServiceClient;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PipelineServiceClient::new("http://localhost:8080", Duration::from_secs(10))?;
//!     let state = client.get_pipeline_state("deploy").await?;
//!     println!("{} is {}", state.pipeline_name, state.overall_state);
//!     Ok(())
//! }
//! ```

pub mod error;
mod pipelines;
mod receiver;
mod secrets;

pub use error::{ClientError, Result};
pub use receiver::ReceiverClient;
pub use secrets::SecretStoreClient;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the pipeline orchestration service
#[derive(Debug, Clone)]
pub struct PipelineServiceClient {
    /// Base URL of the service (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl PipelineServiceClient {
    /// Create a new pipeline service client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the pipeline service API
    /// * `timeout` - Upper bound for each request
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(base_url, build_http_client(timeout)?))
    }

    /// Create a new pipeline service client with a custom HTTP client
    ///
    /// This allows you to configure proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client,
        }
    }

    /// Get the base URL of the pipeline service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Build a reqwest client with the given request timeout
pub(crate) fn build_http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

fn normalize_base_url(base_url: impl Into<String>) -> String {
    base_url.into().trim_end_matches('/').to_string()
}

/// Join path segments onto a base URL, percent-encoding each segment
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| ClientError::InvalidRequest(format!("Invalid base URL {}: {}", base_url, e)))?;

    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidRequest(format!("Base URL {} cannot take a path", base_url)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// Handle an API response and deserialize JSON
///
/// Checks the status code and returns an appropriate error if the request
/// failed, or deserializes the response body if successful.
pub(crate) async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ClientError::api_error(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
}
