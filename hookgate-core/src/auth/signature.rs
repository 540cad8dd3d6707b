//! HMAC-SHA256 request signatures

use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, info};

use super::constant_time_eq;
use super::error::{AuthError, DenialReason};

type HmacSha256 = Hmac<Sha256>;

/// The only algorithm identifier accepted in the signature header
pub const EXPECTED_ALGORITHM: &str = "sha256";

/// A signature header value of the form `<algorithm>=<digest>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub algorithm: String,
    pub digest: String,
}

impl Signature {
    /// Parses a header value, splitting on the first `=`
    ///
    /// Base64 padding after the first `=` stays part of the digest.
    pub fn parse(header_value: &str) -> Result<Self, AuthError> {
        let value = header_value.trim();
        if value.is_empty() {
            return Err(DenialReason::EmptyHeader.into());
        }

        let (algorithm, digest) = value
            .split_once('=')
            .ok_or(AuthError::AccessDenied(DenialReason::MalformedHeader))?;

        if algorithm.is_empty() || digest.is_empty() {
            return Err(DenialReason::MalformedHeader.into());
        }

        Ok(Self {
            algorithm: algorithm.to_string(),
            digest: digest.to_string(),
        })
    }
}

/// Base64 of HMAC-SHA256(`secret`, `body`)
pub fn compute_digest(secret: &[u8], body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Header value a sender attaches to `body`: `sha256=<base64 digest>`
pub fn sign(secret: &[u8], body: &[u8]) -> String {
    format!("{}={}", EXPECTED_ALGORITHM, compute_digest(secret, body))
}

/// Checks that the signature header is present and not blank
///
/// Needs nothing but the header, so a caller can reject before reading the body.
pub fn require_header(header_value: Option<&str>) -> Result<&str, AuthError> {
    let Some(header_value) = header_value else {
        info!("Signature header is missing");
        return Err(DenialReason::MissingHeader.into());
    };

    if header_value.trim().is_empty() {
        info!("Signature header was found, but empty");
        return Err(DenialReason::EmptyHeader.into());
    }

    Ok(header_value)
}

/// Verifies that `header_value` carries a valid signature of `body`
///
/// # Arguments
/// * `header_value` - The signature header, `None` when the request lacks it
/// * `body` - The raw request body, exactly as received
/// * `secret` - The shared HMAC key
///
/// # Returns
/// `Ok(())` only when the header is present, well formed, names `sha256`,
/// and its digest matches. Anything else is `AuthError::AccessDenied`.
pub fn verify_signature(
    header_value: Option<&str>,
    body: &[u8],
    secret: &[u8],
) -> Result<(), AuthError> {
    let header_value = require_header(header_value)?;

    let signature = Signature::parse(header_value).inspect_err(|e| {
        info!("Rejecting signature header: {}", e.reason());
    })?;

    info!("Signature in request is {}={}", signature.algorithm, signature.digest);

    if !signature.algorithm.eq_ignore_ascii_case(EXPECTED_ALGORITHM) {
        info!(
            "Expected {} but found {}",
            EXPECTED_ALGORITHM, signature.algorithm
        );
        return Err(DenialReason::UnsupportedAlgorithm.into());
    }

    debug!("Request body is {} bytes", body.len());

    let expected = compute_digest(secret, body);
    if !constant_time_eq(expected.as_bytes(), signature.digest.as_bytes()) {
        info!("Signatures did not match");
        return Err(DenialReason::SignatureMismatch.into());
    }

    info!("Signature matched");
    Ok(())
}
