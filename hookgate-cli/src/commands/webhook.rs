//! Webhook command handlers
//!
//! Signs payloads with the shared secret and sends them to the receiver.

use anyhow::{Context, Result};
use colored::*;
use hookgate_client::ReceiverClient;
use hookgate_core::auth;
use hookgate_core::dto::webhook::Triggered;
use secrecy::{ExposeSecret, SecretString};

use crate::commands::PayloadArgs;
use crate::config::Config;

/// Print the header value for a payload
pub fn sign(payload: PayloadArgs, config: &Config) -> Result<()> {
    let body = payload.read()?;
    let secret = config.require_secret()?;

    println!("{}", auth::sign(secret.expose_secret().as_bytes(), &body));
    Ok(())
}

/// Sign a payload and post it to the receiver
pub async fn send(payload: PayloadArgs, config: &Config) -> Result<()> {
    let body = payload.read()?;
    let secret = config.require_secret()?;

    let client = ReceiverClient::new(
        &config.receiver_url,
        &config.header_name,
        SecretString::from(secret.expose_secret().to_string()),
        config.timeout,
    )
    .context("Failed to build receiver client")?;

    println!(
        "{} {}/trigger ({}: {})",
        "POST".bold(),
        client.base_url(),
        config.header_name,
        client.signature_for(&body).dimmed()
    );

    let response = client
        .trigger(body)
        .await
        .context("Webhook was not accepted")?;

    match (response.triggered, response.exec_id) {
        (Triggered::Yes, Some(exec_id)) => {
            println!("{} execution {}", "Triggered".green().bold(), exec_id);
        }
        (Triggered::Yes, None) => println!("{}", "Triggered".green().bold()),
        (Triggered::No, _) => {
            println!("{} pipeline is already running", "Not triggered:".yellow().bold());
        }
    }

    Ok(())
}
