//! API Module
//!
//! HTTP boundary of the receiver.
//! Each submodule handles one concern: routes, the signature guard, errors.

pub mod error;
pub mod health;
pub mod signature;
pub mod trigger;

use axum::{
    Router,
    extract::Request,
    middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    // Guard wraps the POST endpoint only, so other methods still get 405
    let webhook = post(trigger::trigger_pipeline).route_layer(middleware::from_fn_with_state(
        state.clone(),
        signature::require_signature,
    ));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/trigger", webhook)
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %Uuid::new_v4(),
            )
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use hookgate_core::auth;
    use hookgate_core::domain::execution::ExecutionId;
    use hookgate_core::domain::pipeline::{OverallState, PipelineState};
    use hookgate_core::{PipelineService, ServiceError};
    use secrecy::SecretString;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    const SECRET: &str = "s3cr3t";
    const HEADER: &str = "x-signature";

    #[derive(Default)]
    struct FakePipelines {
        state: Option<&'static str>,
        fail_with_timeout: bool,
        state_calls: AtomicUsize,
        start_calls: AtomicUsize,
    }

    impl FakePipelines {
        fn in_state(state: &'static str) -> Arc<Self> {
            Arc::new(Self {
                state: Some(state),
                ..Default::default()
            })
        }
    }

    #[async_trait]
    impl PipelineService for FakePipelines {
        async fn get_state(&self, name: &str) -> Result<PipelineState, ServiceError> {
            self.state_calls.fetch_add(1, Ordering::SeqCst);
            match self.state {
                Some(state) => Ok(PipelineState::new(name, OverallState::from(state))),
                None if self.fail_with_timeout => Err(ServiceError::Timeout),
                None => Err(ServiceError::Unavailable("connection refused".to_string())),
            }
        }

        async fn start(&self, _name: &str) -> Result<ExecutionId, ServiceError> {
            self.start_calls.fetch_add(1, Ordering::SeqCst);
            Ok(ExecutionId::new("exec-1"))
        }
    }

    fn app(pipelines: Arc<FakePipelines>, max_body_bytes: usize) -> Router {
        let state = AppState {
            signature_header: axum::http::HeaderName::from_static(HEADER),
            secret: Arc::new(SecretString::from(SECRET.to_string())),
            pipeline_name: Arc::from("deploy"),
            max_body_bytes,
            pipelines,
        };
        create_router(state)
    }

    fn signed_request(body: &'static str, signature: Option<String>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/trigger")
            .header("Content-Type", "application/json");
        if let Some(signature) = signature {
            builder = builder.header(HEADER, signature);
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_signed_request_triggers_idle_pipeline() {
        let pipelines = FakePipelines::in_state("Succeeded");
        let signature = auth::sign(SECRET.as_bytes(), b"{}");

        let response = app(pipelines.clone(), 1024)
            .oneshot(signed_request("{}", Some(signature)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
        assert_eq!(
            json_body(response).await,
            json!({"triggered": "yes", "execId": "exec-1"})
        );
        assert_eq!(pipelines.start_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_running_pipeline_is_not_triggered() {
        let pipelines = FakePipelines::in_state("InProgress");
        let signature = auth::sign(SECRET.as_bytes(), b"{}");

        let response = app(pipelines.clone(), 1024)
            .oneshot(signed_request("{}", Some(signature)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"triggered": "no"}));
        assert_eq!(pipelines.state_calls.load(Ordering::SeqCst), 1);
        assert_eq!(pipelines.start_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_wrong_digest_is_denied_without_upstream_calls() {
        let pipelines = FakePipelines::in_state("Succeeded");
        let signature = auth::sign(b"not-the-secret", b"{}");

        let response = app(pipelines.clone(), 1024)
            .oneshot(signed_request("{}", Some(signature)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(json_body(response).await, json!({"error": "Denied."}));
        assert_eq!(pipelines.state_calls.load(Ordering::SeqCst), 0);
        assert_eq!(pipelines.start_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_and_malformed_headers_get_the_same_denial() {
        for signature in [None, Some("no-separator".to_string()), Some(String::new())] {
            let pipelines = FakePipelines::in_state("Succeeded");

            let response = app(pipelines.clone(), 1024)
                .oneshot(signed_request(r#"{"ref":"main"}"#, signature))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::FORBIDDEN);
            assert_eq!(json_body(response).await, json!({"error": "Denied."}));
            assert_eq!(pipelines.state_calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_body_tampered_after_signing_is_denied() {
        let pipelines = FakePipelines::in_state("Succeeded");
        let signature = auth::sign(SECRET.as_bytes(), br#"{"ref":"main"}"#);

        let response = app(pipelines, 1024)
            .oneshot(signed_request(r#"{"ref":"evil"}"#, Some(signature)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_generic_bad_gateway() {
        let pipelines = Arc::new(FakePipelines::default());
        let signature = auth::sign(SECRET.as_bytes(), b"{}");

        let response = app(pipelines, 1024)
            .oneshot(signed_request("{}", Some(signature)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            json_body(response).await,
            json!({"error": "Pipeline service request failed"})
        );
    }

    #[tokio::test]
    async fn test_upstream_timeout_is_gateway_timeout() {
        let pipelines = Arc::new(FakePipelines {
            fail_with_timeout: true,
            ..Default::default()
        });
        let signature = auth::sign(SECRET.as_bytes(), b"{}");

        let response = app(pipelines, 1024)
            .oneshot(signed_request("{}", Some(signature)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn test_oversized_body_is_rejected() {
        let pipelines = FakePipelines::in_state("Succeeded");
        let body = r#"{"padding":"0123456789012345678901234567890123456789"}"#;
        let signature = auth::sign(SECRET.as_bytes(), body.as_bytes());

        let response = app(pipelines.clone(), 16)
            .oneshot(signed_request(body, Some(signature)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(pipelines.state_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unsigned_oversized_body_is_denied_not_measured() {
        let body = r#"{"padding":"0123456789012345678901234567890123456789"}"#;
        for signature in [None, Some(String::new()), Some("   ".to_string())] {
            let pipelines = FakePipelines::in_state("Succeeded");

            let response = app(pipelines.clone(), 16)
                .oneshot(signed_request(body, signature))
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::FORBIDDEN);
            assert_eq!(json_body(response).await, json!({"error": "Denied."}));
            assert_eq!(pipelines.state_calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_health_needs_no_signature() {
        let response = app(FakePipelines::in_state("Succeeded"), 1024)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_trigger_only_accepts_post() {
        let response = app(FakePipelines::in_state("Succeeded"), 1024)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/trigger")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_get_trigger_with_signature_is_still_not_allowed() {
        let pipelines = FakePipelines::in_state("Succeeded");
        let response = app(pipelines.clone(), 1024)
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/trigger")
                    .header(HEADER, auth::sign(SECRET.as_bytes(), b""))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(pipelines.state_calls.load(Ordering::SeqCst), 0);
    }
}
