//! Payload input shared by `sign` and `send`

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

const DEFAULT_PAYLOAD: &str = "{}";

/// Where the webhook body comes from
#[derive(Args)]
pub struct PayloadArgs {
    /// Payload given inline
    #[arg(long, conflicts_with = "file")]
    body: Option<String>,

    /// Read the payload from a file
    #[arg(short, long)]
    file: Option<PathBuf>,
}

impl PayloadArgs {
    /// Raw payload bytes, exactly as they will be signed and sent
    pub fn read(&self) -> Result<Vec<u8>> {
        match (&self.body, &self.file) {
            (Some(body), _) => Ok(body.clone().into_bytes()),
            (None, Some(path)) => std::fs::read(path)
                .with_context(|| format!("Failed to read payload file {}", path.display())),
            (None, None) => Ok(DEFAULT_PAYLOAD.as_bytes().to_vec()),
        }
    }
}
