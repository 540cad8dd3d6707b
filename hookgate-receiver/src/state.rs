//! Shared application state
//!
//! Built once at startup and cloned into every request. Nothing in here is
//! mutated after construction.

use axum::http::HeaderName;
use hookgate_core::PipelineService;
use secrecy::SecretString;
use std::sync::Arc;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    /// Header the signature is read from
    pub signature_header: HeaderName,
    /// Shared HMAC key
    pub secret: Arc<SecretString>,
    /// The pipeline this receiver manages
    pub pipeline_name: Arc<str>,
    /// Largest body the signature check buffers
    pub max_body_bytes: usize,
    /// Pipeline orchestration service
    pub pipelines: Arc<dyn PipelineService>,
}

impl AppState {
    pub fn new(config: &Config, secret: SecretString, pipelines: Arc<dyn PipelineService>) -> Self {
        Self {
            signature_header: config.header_name.clone(),
            secret: Arc::new(secret),
            pipeline_name: Arc::from(config.pipeline_name.as_str()),
            max_body_bytes: config.max_body_bytes,
            pipelines,
        }
    }
}
