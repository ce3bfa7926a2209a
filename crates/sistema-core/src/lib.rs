//! Core state-transition engine for sistema
//!
//! This crate holds the rules of the system:
//! - Daily rollover with history recording and the freeze check
//! - The A/B/C rotating mission cycle
//! - Mission outcomes, streaks and attribute effects
//! - A read-only projection of the state for front-ends
//!
//! Transitions are plain functions over [`sistema_api::PersistedState`];
//! [`SistemaEngine`] wires them to a store and a clock.

pub mod attributes;
pub mod cycle;
mod engine;
mod events;
pub mod freeze;
pub mod missions;
pub mod reset;
mod view;

pub use engine::*;
pub use events::*;
pub use missions::{MissionKind, MissionReport};
pub use view::*;
