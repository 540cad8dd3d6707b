//! Secret store DTOs

use serde::Deserialize;

/// A parameter fetched from the secret store
///
/// Intentionally not `Serialize` and not `Debug`-printable with its value.
#[derive(Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

impl std::fmt::Debug for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .finish()
    }
}
