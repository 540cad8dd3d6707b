//! Pipeline service DTOs

use serde::{Deserialize, Serialize};

use crate::domain::execution::ExecutionId;

/// Response of the pipeline service when an execution is started
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartExecutionResponse {
    pub execution_id: ExecutionId,
}
