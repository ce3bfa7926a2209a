//! Store trait definitions

use sistema_api::PersistedState;

use crate::StoreResult;

/// Load/save of the single state document.
///
/// Implementations own exactly one document, stored under
/// [`sistema_api::STATE_KEY`]. Saving replaces it wholesale; the last
/// save wins.
pub trait StateStore: Send + Sync {
    /// Load the stored document, `None` on first run.
    ///
    /// A document that exists but does not decode yields
    /// `StoreError::Serialization`.
    fn load(&self) -> StoreResult<Option<PersistedState>>;

    /// Replace the stored document
    fn save(&self, state: &PersistedState) -> StoreResult<()>;

    /// Check if store is healthy
    fn is_healthy(&self) -> bool;
}
