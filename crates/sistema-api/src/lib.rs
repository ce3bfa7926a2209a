//! Persisted document types for sistema
//!
//! This crate defines the durable contract between the engine, the store
//! and front-ends:
//! - Mission keys, cycles and the tri-state mission status
//! - The single persisted state document
//! - Feedback severities and weekly status labels

mod mission;
mod state;
mod types;

pub use mission::*;
pub use state::*;
pub use types::*;

/// Fixed identifier the state document is stored under
pub const STATE_KEY: &str = "sistemaState";
