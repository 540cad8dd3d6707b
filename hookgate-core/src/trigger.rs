//! Trigger decision
//!
//! Starts a pipeline execution only when the pipeline is idle.
//!
//! The check is optimistic: the state read and the start call are two
//! separate requests, so a concurrent webhook (or the service itself) may
//! change the state in between. Nothing here locks or serializes that
//! window; admission is left to the pipeline service.

use async_trait::async_trait;
use tracing::info;

use crate::domain::execution::ExecutionId;
use crate::domain::pipeline::PipelineState;
use crate::error::ServiceError;

/// The external pipeline orchestration service
#[async_trait]
pub trait PipelineService: Send + Sync {
    /// Queries the current state of the named pipeline
    async fn get_state(&self, name: &str) -> Result<PipelineState, ServiceError>;

    /// Starts a new execution of the named pipeline
    ///
    /// # Returns
    /// The identifier of the execution that was started
    async fn start(&self, name: &str) -> Result<ExecutionId, ServiceError>;
}

/// Outcome of [`decide_and_trigger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerResult {
    /// A new execution was started
    Triggered(ExecutionId),
    /// The pipeline was already running; nothing was started
    NotTriggered,
}

/// Starts `pipeline_name` unless it is already `InProgress`
///
/// Errors from either call are returned as-is, without retry.
pub async fn decide_and_trigger(
    pipeline_name: &str,
    service: &dyn PipelineService,
) -> Result<TriggerResult, ServiceError> {
    info!("Checking state of pipeline {}", pipeline_name);

    let state = service.get_state(pipeline_name).await?;

    if state.is_in_progress() {
        info!("Pipeline {} is running, not triggering again", pipeline_name);
        return Ok(TriggerResult::NotTriggered);
    }

    info!(
        "Pipeline {} state is {}, triggering",
        pipeline_name, state.overall_state
    );

    let execution_id = service.start(pipeline_name).await?;

    info!(
        "Started execution {} of pipeline {}",
        execution_id, pipeline_name
    );

    Ok(TriggerResult::Triggered(execution_id))
}
