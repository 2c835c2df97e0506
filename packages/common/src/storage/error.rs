use thiserror::Error;

use crate::cheese::CheeseId;

/// Errors that can occur during catalogue store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A record with this id is already stored.
    #[error("cheese with ID {0} already exists")]
    DuplicateId(CheeseId),
    /// No record with this id is stored.
    #[error("cheese with ID {0} not found")]
    NotFound(CheeseId),
    /// A writer panicked while holding the collection lock.
    #[error("catalogue store lock poisoned")]
    Poisoned,
}
