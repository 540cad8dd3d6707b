//! Trigger API Handler

use axum::{Json, extract::State};
use hookgate_core::decide_and_trigger;
use hookgate_core::dto::webhook::WebhookResponse;

use crate::api::error::ApiResult;
use crate::state::AppState;

/// POST /trigger
/// Start the configured pipeline unless it is already running
///
/// Only reached once the signature guard has accepted the request.
pub async fn trigger_pipeline(State(state): State<AppState>) -> ApiResult<Json<WebhookResponse>> {
    tracing::info!("Webhook accepted for pipeline {}", state.pipeline_name);

    let result = decide_and_trigger(&state.pipeline_name, state.pipelines.as_ref()).await?;

    Ok(Json(result.into()))
}
