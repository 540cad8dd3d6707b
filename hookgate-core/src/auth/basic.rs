//! `Authorization: Basic` credentials check
//!
//! Not wired into the webhook route; kept for deployments that front the
//! receiver with static credentials.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::info;

use super::constant_time_eq;
use super::error::{AuthError, DenialReason};

/// Verifies an `Authorization` header against the expected credentials
///
/// Both the username and the password are compared in constant time, and
/// both comparisons always run.
pub fn verify_basic_auth(
    header_value: Option<&str>,
    expected_user: &str,
    expected_pass: &str,
) -> Result<(), AuthError> {
    let Some(header_value) = header_value else {
        info!("Authorization header is missing");
        return Err(DenialReason::MissingHeader.into());
    };

    let Some((scheme, encoded)) = header_value.trim().split_once(' ') else {
        info!("We only support basic authentication");
        return Err(DenialReason::UnsupportedScheme.into());
    };

    if !scheme.eq_ignore_ascii_case("basic") {
        info!("We only support basic authentication");
        return Err(DenialReason::UnsupportedScheme.into());
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| {
            info!("Basic credentials are not valid base64 UTF-8");
            AuthError::AccessDenied(DenialReason::MalformedCredentials)
        })?;

    let Some((user, pass)) = decoded.split_once(':') else {
        info!("Basic credentials have no ':' separator");
        return Err(DenialReason::MalformedCredentials.into());
    };

    let user_ok = constant_time_eq(user.as_bytes(), expected_user.as_bytes());
    let pass_ok = constant_time_eq(pass.as_bytes(), expected_pass.as_bytes());

    if user_ok & pass_ok {
        info!("Username/password match");
        Ok(())
    } else {
        info!("Username/password mismatch");
        Err(DenialReason::CredentialMismatch.into())
    }
}
