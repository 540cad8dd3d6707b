//! Secret store endpoints

use async_trait::async_trait;
use hookgate_core::dto::secret::Parameter;
use hookgate_core::{SecretStore, ServiceError};
use reqwest::Client;
use secrecy::SecretString;
use std::time::Duration;

use crate::error::Result;
use crate::{build_http_client, endpoint, handle_response, normalize_base_url};

/// HTTP client for the secret-parameter store
#[derive(Debug, Clone)]
pub struct SecretStoreClient {
    base_url: String,
    client: Client,
}

impl SecretStoreClient {
    /// Create a new secret store client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(base_url, build_http_client(timeout)?))
    }

    /// Create a new secret store client with a custom HTTP client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a parameter, asking the store to decrypt it
    ///
    /// The value is returned wrapped so it cannot end up in logs by accident.
    pub async fn fetch_parameter(&self, name: &str) -> Result<SecretString> {
        let mut url = endpoint(&self.base_url, &["parameter", name])?;
        url.query_pairs_mut().append_pair("with_decryption", "true");

        tracing::debug!("Fetching parameter {} from secret store", name);
        let response = self.client.get(url).send().await?;

        let parameter: Parameter = handle_response(response).await?;
        Ok(SecretString::from(parameter.value))
    }
}

#[async_trait]
impl SecretStore for SecretStoreClient {
    async fn get_parameter(&self, name: &str) -> std::result::Result<SecretString, ServiceError> {
        Ok(self.fetch_parameter(name).await?)
    }
}
