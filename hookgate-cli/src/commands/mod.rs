//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod payload;
mod pipeline;
mod webhook;

pub use payload::PayloadArgs;
pub use pipeline::PipelineCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print the signature header value for a payload
    Sign {
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Sign a payload and post it to the receiver
    Send {
        #[command(flatten)]
        payload: PayloadArgs,
    },
    /// Talk to the pipeline service directly
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Sign { payload } => webhook::sign(payload, config),
        Commands::Send { payload } => webhook::send(payload, config).await,
        Commands::Pipeline { command } => pipeline::handle_pipeline_command(command, config).await,
    }
}
