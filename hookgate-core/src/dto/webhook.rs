//! Webhook response DTOs

use serde::{Deserialize, Serialize};

use crate::domain::execution::ExecutionId;
use crate::trigger::TriggerResult;

/// Whether the webhook started a new execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Triggered {
    Yes,
    No,
}

/// JSON body returned by `POST /trigger`
///
/// `{"triggered": "yes", "execId": "<id>"}` or `{"triggered": "no"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub triggered: Triggered,
    #[serde(rename = "execId", default, skip_serializing_if = "Option::is_none")]
    pub exec_id: Option<ExecutionId>,
}

impl From<TriggerResult> for WebhookResponse {
    fn from(result: TriggerResult) -> Self {
        match result {
            TriggerResult::Triggered(exec_id) => Self {
                triggered: Triggered::Yes,
                exec_id: Some(exec_id),
            },
            TriggerResult::NotTriggered => Self {
                triggered: Triggered::No,
                exec_id: None,
            },
        }
    }
}
