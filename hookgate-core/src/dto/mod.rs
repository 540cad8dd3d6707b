//! Data Transfer Objects
//!
//! Wire shapes exchanged with the webhook caller and with the external
//! pipeline and secret services.

pub mod pipeline;
pub mod secret;
pub mod webhook;
