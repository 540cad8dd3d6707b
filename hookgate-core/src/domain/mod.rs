//! Core domain types
//!
//! Entities that describe the managed pipeline as seen from the receiver.
//! They are transient and scoped to a single request.

pub mod execution;
pub mod pipeline;
