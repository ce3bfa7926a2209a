//! Shared utilities for sistema
//!
//! This crate provides:
//! - The injectable clock (system clock with mock-time support, fixed clock for tests)
//! - Calendar-day and week arithmetic used by the daily reset
//! - Error types
//! - Default paths for config and data directories

mod day;
mod error;
mod paths;
mod time;

pub use day::*;
pub use error::*;
pub use paths::*;
pub use time::*;
