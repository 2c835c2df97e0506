use common::{CheeseId, StoreError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CatalogueError {
    #[error("Failed to create cheese: Cheese with ID {0} already exists")]
    DuplicateId(CheeseId),

    #[error("Cheese not found")]
    NotFound,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for CatalogueError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateId(id) => CatalogueError::DuplicateId(id),
            StoreError::NotFound(_) => CatalogueError::NotFound,
            other => CatalogueError::Storage(other),
        }
    }
}
