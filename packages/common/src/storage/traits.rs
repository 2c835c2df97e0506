use super::error::StoreError;
use crate::cheese::{Cheese, CheeseId};

/// Owner of the live cheese collection.
///
/// Implementations must make `create` atomic with respect to the id
/// uniqueness check, since requests may run concurrently.
pub trait CheeseStore: Send + Sync {
    /// Insert a record. Fails with [`StoreError::DuplicateId`] if the id is taken.
    fn create(&self, cheese: Cheese) -> Result<Cheese, StoreError>;

    /// Snapshot of every record in insertion order.
    fn get_all(&self) -> Result<Vec<Cheese>, StoreError>;

    /// Look up a record by id. Absence is not an error.
    fn get_by_id(&self, id: CheeseId) -> Result<Option<Cheese>, StoreError>;

    /// Replace the record sharing `cheese.id` wholesale.
    fn update(&self, cheese: Cheese) -> Result<Cheese, StoreError>;

    /// Remove the record with this id.
    fn delete(&self, id: CheeseId) -> Result<(), StoreError>;

    /// Number of live records.
    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.get_all()?.len())
    }
}
