//! Pipeline service endpoints

use async_trait::async_trait;
use hookgate_core::domain::execution::ExecutionId;
use hookgate_core::domain::pipeline::PipelineState;
use hookgate_core::dto::pipeline::StartExecutionResponse;
use hookgate_core::{PipelineService, ServiceError};

use crate::error::{ClientError, Result};
use crate::{PipelineServiceClient, endpoint, handle_response};

impl PipelineServiceClient {
    /// Get the current state of a pipeline
    ///
    /// # Arguments
    /// * `name` - The pipeline name
    pub async fn get_pipeline_state(&self, name: &str) -> Result<PipelineState> {
        let url = endpoint(&self.base_url, &["pipeline", name, "state"])?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        handle_response(response).await
    }

    /// Start a new execution of a pipeline
    ///
    /// # Arguments
    /// * `name` - The pipeline name
    ///
    /// # Returns
    /// The identifier of the started execution
    pub async fn start_pipeline_execution(&self, name: &str) -> Result<ExecutionId> {
        let url = endpoint(&self.base_url, &["pipeline", name, "execution"])?;
        tracing::debug!("POST {}", url);
        let response = self.client.post(url).send().await?;

        let started: StartExecutionResponse = handle_response(response).await?;
        if started.execution_id.is_empty() {
            return Err(ClientError::ParseError(
                "Pipeline service returned an empty execution id".to_string(),
            ));
        }

        Ok(started.execution_id)
    }
}

#[async_trait]
impl PipelineService for PipelineServiceClient {
    async fn get_state(&self, name: &str) -> std::result::Result<PipelineState, ServiceError> {
        Ok(self.get_pipeline_state(name).await?)
    }

    async fn start(&self, name: &str) -> std::result::Result<ExecutionId, ServiceError> {
        Ok(self.start_pipeline_execution(name).await?)
    }
}
