//! Pipeline command handlers
//!
//! Queries and starts the managed pipeline without going through the
//! receiver. `start` bypasses the running check on purpose.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use hookgate_client::PipelineServiceClient;
use hookgate_core::domain::pipeline::{OverallState, PipelineState};

use crate::config::Config;

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// Show the current state of a pipeline
    State {
        /// Pipeline name
        name: String,
    },
    /// Start a new execution unconditionally
    Start {
        /// Pipeline name
        name: String,
    },
}

/// Handle pipeline commands
pub async fn handle_pipeline_command(command: PipelineCommands, config: &Config) -> Result<()> {
    let client = PipelineServiceClient::new(&config.service_url, config.timeout)
        .context("Failed to build pipeline service client")?;

    match command {
        PipelineCommands::State { name } => {
            let state = client
                .get_pipeline_state(&name)
                .await
                .with_context(|| format!("Failed to get state of pipeline {}", name))?;
            print_state(&state);
        }
        PipelineCommands::Start { name } => {
            let exec_id = client
                .start_pipeline_execution(&name)
                .await
                .with_context(|| format!("Failed to start pipeline {}", name))?;
            println!("{} execution {}", "Started".green().bold(), exec_id);
        }
    }

    Ok(())
}

fn print_state(state: &PipelineState) {
    println!("{}: {}", "Pipeline".bold(), state.pipeline_name);
    println!("{}: {}", "State".bold(), colorize(&state.overall_state));
    if let Some(updated_at) = state.updated_at {
        println!("{}: {}", "Updated".bold(), updated_at.to_rfc3339());
    }
}

fn colorize(state: &OverallState) -> ColoredString {
    match state {
        OverallState::InProgress | OverallState::Stopping => state.as_str().cyan(),
        OverallState::Succeeded => state.as_str().green(),
        OverallState::Failed | OverallState::Cancelled => state.as_str().red(),
        _ => state.as_str().normal(),
    }
}
