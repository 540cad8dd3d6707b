//! Hookgate Receiver
//!
//! Single-endpoint webhook receiver. A signed `POST /trigger` starts the
//! configured pipeline unless it is already running.
//!
//! Startup:
//! - Configuration: read once from the environment; any error is fatal
//! - Secret: the shared HMAC token, literal or fetched from the secret store
//! - Pipeline service: reqwest client with a bounded timeout
//! - Router: signature guard + trigger handler, health check

mod api;
mod config;
mod state;

use anyhow::{Context, Result};
use hookgate_client::{PipelineServiceClient, SecretStoreClient};
use hookgate_core::SecretStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hookgate_receiver=info,hookgate_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hookgate Receiver...");

    let config = Config::from_env().context("Invalid receiver configuration")?;
    info!(
        "Loaded configuration: pipeline={}, header={}, pipeline_service_url={}",
        config.pipeline_name,
        config.header_name.as_str(),
        config.pipeline_service_url
    );

    let secret_store = config
        .secret_store_url
        .as_deref()
        .map(|url| SecretStoreClient::new(url, config.upstream_timeout))
        .transpose()
        .context("Failed to build secret store client")?;

    let secret = config
        .resolve_token(secret_store.as_ref().map(|store| store as &dyn SecretStore))
        .await
        .context("Failed to resolve HMAC token")?;

    info!("HMAC token loaded");

    let pipelines = PipelineServiceClient::new(&config.pipeline_service_url, config.upstream_timeout)
        .context("Failed to build pipeline service client")?;

    let state = AppState::new(&config, secret, Arc::new(pipelines));
    let app = api::create_router(state);

    info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Receiver stopped");

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
