//! Error types for sistema

use chrono::{DateTime, Local};
use thiserror::Error;

/// Core error type for sistema operations
#[derive(Debug, Error)]
pub enum SistemaError {
    #[error("System frozen until {until}")]
    Frozen { until: DateTime<Local> },

    #[error("Unknown mission: {0}")]
    UnknownMission(String),

    #[error("Store error: {0}")]
    StoreError(String),
}

impl SistemaError {
    pub fn unknown_mission(key: impl Into<String>) -> Self {
        Self::UnknownMission(key.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreError(msg.into())
    }

    /// Whether this error is a rejection of user input rather than a fault
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Frozen { .. } | Self::UnknownMission(_))
    }
}

pub type Result<T> = std::result::Result<T, SistemaError>;
