//! Hookgate Core
//!
//! Core types and logic for the Hookgate webhook receiver.
//!
//! This crate contains:
//! - Domain types: Pipeline state, execution identifiers
//! - DTOs: Wire shapes for the webhook response and the external services
//! - Auth: HMAC signature verification and the Basic-auth helper
//! - Trigger: The trigger-if-idle decision over a [`PipelineService`]
//! - Secret: The [`SecretStore`] collaborator used to resolve the shared token

pub mod auth;
pub mod domain;
pub mod dto;
pub mod error;
pub mod secret;
pub mod trigger;

pub use error::ServiceError;
pub use secret::SecretStore;
pub use trigger::{PipelineService, TriggerResult, decide_and_trigger};
