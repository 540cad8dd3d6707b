//! API Error Handling
//!
//! Maps authentication and upstream failures onto HTTP responses without
//! revealing more than the caller needs.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hookgate_core::ServiceError;
use hookgate_core::auth::{AuthError, DENIED_MESSAGE};

/// API error type
#[derive(Debug)]
pub enum ApiError {
    AccessDenied(AuthError),
    Upstream(ServiceError),
    PayloadTooLarge,
    UnreadableBody,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::AccessDenied(err) => {
                tracing::info!("Access denied: {}", err.reason());
                (StatusCode::FORBIDDEN, DENIED_MESSAGE)
            }
            ApiError::Upstream(err) => {
                tracing::error!("Pipeline service error: {}", err);
                let status = if err.is_timeout() {
                    StatusCode::GATEWAY_TIMEOUT
                } else {
                    StatusCode::BAD_GATEWAY
                };
                (status, "Pipeline service request failed")
            }
            ApiError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large"),
            ApiError::UnreadableBody => (StatusCode::BAD_REQUEST, "Could not read request body"),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::AccessDenied(err)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Upstream(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
