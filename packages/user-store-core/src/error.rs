//! Store error types.

use thiserror::Error;

/// User store operation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Lock poisoned (RwLock poisoned by a panicking writer)
    #[error("Lock poisoned")]
    LockPoisoned,
}
