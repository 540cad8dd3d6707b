//! Request authentication
//!
//! - [`verify_signature`]: HMAC-SHA256 over the raw body, `sha256=<base64>` header
//! - [`verify_basic_auth`]: `Authorization: Basic` credentials check
//!
//! Both compare secrets in constant time and fail with the same
//! [`AuthError::AccessDenied`], whose message never says what went wrong.

mod basic;
mod error;
mod signature;

pub use basic::verify_basic_auth;
pub use error::{AuthError, DENIED_MESSAGE, DenialReason};
pub use signature::{
    EXPECTED_ALGORITHM, Signature, compute_digest, require_header, sign, verify_signature,
};

use subtle::ConstantTimeEq;

/// Equality whose running time does not depend on where the inputs differ
///
/// Inputs of different lengths compare unequal; the length itself is not
/// treated as secret.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
