//! HMAC signature guard
//!
//! Route middleware that checks the signature header, buffers the raw body,
//! verifies the signature against it, and hands the same bytes on to the
//! handler.

use axum::{
    body::{self, Body},
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use hookgate_core::auth;
use http_body_util::LengthLimitError;
use secrecy::ExposeSecret;

use crate::api::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Rejects the request with 403 unless it carries a valid signature
///
/// A missing or blank header is denied before the body is read, so an
/// unsigned caller never learns the body limit.
pub async fn require_signature(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let (parts, body) = request.into_parts();

    // A value that is not visible ASCII is treated like an empty header
    let header = parts
        .headers
        .get(&state.signature_header)
        .map(|value| value.to_str().unwrap_or_default());

    let header = auth::require_header(header)?;
    tracing::info!("{} header is present", state.signature_header.as_str());

    let bytes = body::to_bytes(body, state.max_body_bytes)
        .await
        .map_err(read_error)?;

    auth::verify_signature(Some(header), &bytes, state.secret.expose_secret().as_bytes())?;

    let request = Request::from_parts(parts, Body::from(bytes));
    Ok(next.run(request).await)
}

fn read_error(err: axum::Error) -> ApiError {
    let inner = err.into_inner();
    if inner.downcast_ref::<LengthLimitError>().is_some() {
        tracing::info!("Request body exceeds the configured limit");
        ApiError::PayloadTooLarge
    } else {
        tracing::info!("Could not read request body: {}", inner);
        ApiError::UnreadableBody
    }
}
