//! Secret store collaborator
//!
//! The shared HMAC token may be kept in an external parameter store instead
//! of being passed literally. The store is only consulted once, at startup.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::ServiceError;

/// Read access to a secret-parameter store
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Fetches and decrypts the named parameter
    async fn get_parameter(&self, name: &str) -> Result<SecretString, ServiceError>;
}
