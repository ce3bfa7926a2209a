//! Persistence layer for sistema
//!
//! Provides:
//! - The `StateStore` trait: load/save of the single state document
//! - A SQLite-backed implementation keyed by a fixed identifier

mod sqlite;
mod traits;

pub use sqlite::*;
pub use traits::*;

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// The stored document exists but could not be decoded
    pub fn is_malformed(&self) -> bool {
        matches!(self, StoreError::Serialization(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

impl From<StoreError> for sistema_util::SistemaError {
    fn from(e: StoreError) -> Self {
        sistema_util::SistemaError::store(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
