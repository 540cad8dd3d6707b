//! Hookgate CLI
//!
//! Command-line tool for operating a Hookgate receiver: sign payloads, send
//! signed webhooks, and query or start the managed pipeline directly.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use secrecy::SecretString;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "hookgate")]
#[command(about = "Hookgate webhook receiver CLI", long_about = None)]
struct Cli {
    /// Receiver URL
    #[arg(
        long,
        env = "HOOKGATE_RECEIVER_URL",
        default_value = "http://localhost:5000"
    )]
    receiver_url: String,

    /// Pipeline service URL
    #[arg(
        long,
        env = "HOOKGATE_SERVICE_URL",
        default_value = "http://localhost:8080"
    )]
    service_url: String,

    /// Header the receiver reads the signature from
    #[arg(long, env = "HMAC_HEADER_NAME", default_value = "X-Signature")]
    header_name: String,

    /// Shared HMAC secret
    #[arg(long, env = "HMAC_TOKEN", hide_env_values = true)]
    secret: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        receiver_url: cli.receiver_url,
        service_url: cli.service_url,
        header_name: cli.header_name,
        secret: cli.secret.map(SecretString::from),
        timeout: Duration::from_secs(cli.timeout),
    };

    handle_command(cli.command, &config).await
}
