//! Pipeline domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot of a pipeline as reported by the pipeline service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineState {
    pub pipeline_name: String,
    pub overall_state: OverallState,
    #[serde(default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl PipelineState {
    pub fn new(pipeline_name: impl Into<String>, overall_state: OverallState) -> Self {
        Self {
            pipeline_name: pipeline_name.into(),
            overall_state,
            updated_at: None,
        }
    }

    /// True while an execution is running and a new one must not be started
    pub fn is_in_progress(&self) -> bool {
        self.overall_state.is_in_progress()
    }
}

/// Aggregate state of a pipeline
///
/// Only `InProgress` blocks a trigger. Every other value, including ones the
/// service adds later (kept in `Other`), counts as idle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OverallState {
    InProgress,
    Stopping,
    Stopped,
    Succeeded,
    Superseded,
    Failed,
    Cancelled,
    Other(String),
}

impl OverallState {
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::InProgress => "InProgress",
            Self::Stopping => "Stopping",
            Self::Stopped => "Stopped",
            Self::Succeeded => "Succeeded",
            Self::Superseded => "Superseded",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
            Self::Other(value) => value,
        }
    }
}

impl From<String> for OverallState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "InProgress" => Self::InProgress,
            "Stopping" => Self::Stopping,
            "Stopped" => Self::Stopped,
            "Succeeded" => Self::Succeeded,
            "Superseded" => Self::Superseded,
            "Failed" => Self::Failed,
            "Cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for OverallState {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<OverallState> for String {
    fn from(state: OverallState) -> Self {
        match state {
            OverallState::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for OverallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
