//! Receiver configuration
//!
//! Read once from the environment at startup. Any problem here is fatal:
//! the receiver must not start serving with a partial configuration.

use axum::http::HeaderName;
use hookgate_core::{SecretStore, ServiceError};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Configuration error; the process stops before binding a socket
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error("failed to resolve HMAC token from secret store")]
    SecretStore(#[source] ServiceError),
}

impl ConfigError {
    fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name,
            reason: reason.into(),
        }
    }
}

/// Where the shared HMAC token comes from
#[derive(Debug)]
pub enum TokenSource {
    /// Passed directly in `HMAC_TOKEN`
    Literal(SecretString),
    /// Name of a parameter in the secret store (`HMAC_TOKEN_PARAMETER`)
    Parameter(String),
}

/// Receiver configuration
#[derive(Debug)]
pub struct Config {
    /// Header carrying `sha256=<digest>`
    pub header_name: HeaderName,

    /// Source of the shared HMAC token
    pub token: TokenSource,

    /// Secret store base URL, required when the token is a parameter
    pub secret_store_url: Option<String>,

    /// The single pipeline this instance manages
    pub pipeline_name: String,

    /// Pipeline service base URL (e.g., "http://localhost:8080")
    pub pipeline_service_url: String,

    /// Address to listen on
    pub bind_addr: String,

    /// Upper bound for each call to the pipeline service or secret store
    pub upstream_timeout: Duration,

    /// Largest request body the signature check will buffer
    pub max_body_bytes: usize,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - HMAC_HEADER_NAME (required)
    /// - HMAC_TOKEN or HMAC_TOKEN_PARAMETER (exactly one required)
    /// - SECRET_STORE_URL (required with HMAC_TOKEN_PARAMETER)
    /// - PIPELINE_NAME (required)
    /// - PIPELINE_SERVICE_URL (required)
    /// - RECEIVER_BIND_ADDR (optional, default: 0.0.0.0:5000)
    /// - UPSTREAM_TIMEOUT (optional, seconds, default: 10)
    /// - MAX_BODY_BYTES (optional, default: 1048576)
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Builds configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let header_name = required("HMAC_HEADER_NAME")?;
        let header_name = HeaderName::from_bytes(header_name.trim().as_bytes())
            .map_err(|e| ConfigError::invalid("HMAC_HEADER_NAME", e.to_string()))?;

        let token = match (get("HMAC_TOKEN"), get("HMAC_TOKEN_PARAMETER")) {
            (Some(token), None) => TokenSource::Literal(SecretString::from(token)),
            (None, Some(parameter)) => TokenSource::Parameter(parameter),
            (Some(_), Some(_)) => {
                return Err(ConfigError::invalid(
                    "HMAC_TOKEN",
                    "set either HMAC_TOKEN or HMAC_TOKEN_PARAMETER, not both",
                ));
            }
            (None, None) => return Err(ConfigError::Missing("HMAC_TOKEN")),
        };

        let secret_store_url = get("SECRET_STORE_URL");
        let pipeline_name = required("PIPELINE_NAME")?;
        let pipeline_service_url = required("PIPELINE_SERVICE_URL")?;
        let bind_addr = get("RECEIVER_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let upstream_timeout = match get("UPSTREAM_TIMEOUT") {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| ConfigError::invalid("UPSTREAM_TIMEOUT", e.to_string()))?,
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        let max_body_bytes = match get("MAX_BODY_BYTES") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .map_err(|e| ConfigError::invalid("MAX_BODY_BYTES", e.to_string()))?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            header_name,
            token,
            secret_store_url,
            pipeline_name: pipeline_name.trim().to_string(),
            pipeline_service_url,
            bind_addr,
            upstream_timeout,
            max_body_bytes,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pipeline_name.is_empty() {
            return Err(ConfigError::invalid("PIPELINE_NAME", "cannot be empty"));
        }

        check_http_url("PIPELINE_SERVICE_URL", &self.pipeline_service_url)?;

        match (&self.token, &self.secret_store_url) {
            (TokenSource::Parameter(_), None) => {
                return Err(ConfigError::Missing("SECRET_STORE_URL"));
            }
            (_, Some(url)) => check_http_url("SECRET_STORE_URL", url)?,
            _ => {}
        }

        if self.upstream_timeout.is_zero() {
            return Err(ConfigError::invalid(
                "UPSTREAM_TIMEOUT",
                "must be greater than 0",
            ));
        }

        if self.max_body_bytes == 0 {
            return Err(ConfigError::invalid("MAX_BODY_BYTES", "must be greater than 0"));
        }

        Ok(())
    }

    /// Produces the shared HMAC token, consulting the secret store if needed
    ///
    /// Called once at startup; the result is held for the process lifetime.
    pub async fn resolve_token(
        &self,
        store: Option<&dyn SecretStore>,
    ) -> Result<SecretString, ConfigError> {
        match &self.token {
            TokenSource::Literal(token) => Ok(SecretString::from(token.expose_secret().to_string())),
            TokenSource::Parameter(name) => {
                let store = store.ok_or(ConfigError::Missing("SECRET_STORE_URL"))?;
                tracing::info!("Resolving HMAC token from secret store parameter {}", name);
                let token = store
                    .get_parameter(name)
                    .await
                    .map_err(ConfigError::SecretStore)?;

                if token.expose_secret().is_empty() {
                    return Err(ConfigError::invalid(
                        "HMAC_TOKEN_PARAMETER",
                        format!("parameter {} is empty", name),
                    ));
                }

                Ok(token)
            }
        }
    }
}

fn check_http_url(name: &'static str, url: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::invalid(name, "must start with http:// or https://"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn minimal() -> Vec<(&'static str, &'static str)> {
        vec![
            ("HMAC_HEADER_NAME", "X-Signature"),
            ("HMAC_TOKEN", "s3cr3t"),
            ("PIPELINE_NAME", "deploy"),
            ("PIPELINE_SERVICE_URL", "http://localhost:8080"),
        ]
    }

    fn build(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let config = Config::from_lookup(lookup_from(pairs))?;
        config.validate()?;
        Ok(config)
    }

    struct FixedStore(Option<&'static str>);

    #[async_trait]
    impl SecretStore for FixedStore {
        async fn get_parameter(&self, _name: &str) -> Result<SecretString, ServiceError> {
            match self.0 {
                Some(value) => Ok(SecretString::from(value.to_string())),
                None => Err(ServiceError::Rejected {
                    status: 404,
                    message: "ParameterNotFound".to_string(),
                }),
            }
        }
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = build(&minimal()).unwrap();

        assert_eq!(config.header_name.as_str(), "x-signature");
        assert_eq!(config.pipeline_name, "deploy");
        assert_eq!(config.bind_addr, "0.0.0.0:5000");
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert!(matches!(config.token, TokenSource::Literal(_)));
    }

    #[test]
    fn test_missing_required_values() {
        for key in ["HMAC_HEADER_NAME", "PIPELINE_NAME", "PIPELINE_SERVICE_URL", "HMAC_TOKEN"] {
            let pairs: Vec<_> = minimal().into_iter().filter(|(k, _)| *k != key).collect();
            match build(&pairs) {
                Err(ConfigError::Missing(missing)) => assert_eq!(missing, key),
                other => panic!("expected Missing({key}), got {other:?}"),
            }
        }
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut pairs = minimal();
        pairs[2] = ("PIPELINE_NAME", "  ");
        assert!(matches!(build(&pairs), Err(ConfigError::Missing("PIPELINE_NAME"))));
    }

    #[test]
    fn test_invalid_header_name() {
        let mut pairs = minimal();
        pairs[0] = ("HMAC_HEADER_NAME", "X Signature");
        assert!(matches!(
            build(&pairs),
            Err(ConfigError::Invalid { name: "HMAC_HEADER_NAME", .. })
        ));
    }

    #[test]
    fn test_token_and_parameter_are_exclusive() {
        let mut pairs = minimal();
        pairs.push(("HMAC_TOKEN_PARAMETER", "/hookgate/token"));
        assert!(matches!(build(&pairs), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_parameter_requires_secret_store_url() {
        let mut pairs: Vec<_> = minimal()
            .into_iter()
            .filter(|(k, _)| *k != "HMAC_TOKEN")
            .collect();
        pairs.push(("HMAC_TOKEN_PARAMETER", "/hookgate/token"));
        assert!(matches!(build(&pairs), Err(ConfigError::Missing("SECRET_STORE_URL"))));

        pairs.push(("SECRET_STORE_URL", "http://localhost:9000"));
        let config = build(&pairs).unwrap();
        assert!(matches!(config.token, TokenSource::Parameter(ref name) if name == "/hookgate/token"));
    }

    #[test]
    fn test_invalid_numbers_and_urls() {
        let mut pairs = minimal();
        pairs.push(("UPSTREAM_TIMEOUT", "soon"));
        assert!(matches!(
            build(&pairs),
            Err(ConfigError::Invalid { name: "UPSTREAM_TIMEOUT", .. })
        ));

        let mut pairs = minimal();
        pairs.push(("UPSTREAM_TIMEOUT", "0"));
        assert!(build(&pairs).is_err());

        let mut pairs = minimal();
        pairs.push(("MAX_BODY_BYTES", "0"));
        assert!(build(&pairs).is_err());

        let mut pairs = minimal();
        pairs[3] = ("PIPELINE_SERVICE_URL", "localhost:8080");
        assert!(matches!(
            build(&pairs),
            Err(ConfigError::Invalid { name: "PIPELINE_SERVICE_URL", .. })
        ));
    }

    #[test]
    fn test_debug_output_redacts_token() {
        let config = build(&minimal()).unwrap();
        assert!(!format!("{config:?}").contains("s3cr3t"));
    }

    #[tokio::test]
    async fn test_resolve_literal_token() {
        let config = build(&minimal()).unwrap();
        let token = config.resolve_token(None).await.unwrap();
        assert_eq!(token.expose_secret(), "s3cr3t");
    }

    #[tokio::test]
    async fn test_resolve_token_from_store() {
        let mut pairs: Vec<_> = minimal()
            .into_iter()
            .filter(|(k, _)| *k != "HMAC_TOKEN")
            .collect();
        pairs.push(("HMAC_TOKEN_PARAMETER", "/hookgate/token"));
        pairs.push(("SECRET_STORE_URL", "http://localhost:9000"));
        let config = build(&pairs).unwrap();

        let token = config
            .resolve_token(Some(&FixedStore(Some("from-store"))))
            .await
            .unwrap();
        assert_eq!(token.expose_secret(), "from-store");

        let err = config
            .resolve_token(Some(&FixedStore(None)))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::SecretStore(_)));

        let err = config
            .resolve_token(Some(&FixedStore(Some(""))))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
