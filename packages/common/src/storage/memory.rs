use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::error::StoreError;
use super::traits::CheeseStore;
use crate::cheese::{Cheese, CheeseId};

/// In-memory cheese store.
///
/// Records live in a `Vec` so listing preserves insertion order. Every
/// operation takes the lock once, which keeps check-then-insert atomic.
#[derive(Debug, Default)]
pub struct InMemoryCheeseStore {
    cheeses: RwLock<Vec<Cheese>>,
}

impl InMemoryCheeseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `cheeses`, skipping any whose id repeats an
    /// earlier entry.
    pub fn with_cheeses(cheeses: impl IntoIterator<Item = Cheese>) -> Self {
        let mut records: Vec<Cheese> = Vec::new();
        for cheese in cheeses {
            if records.iter().any(|c| c.id == cheese.id) {
                tracing::warn!(id = cheese.id, "Skipping duplicate cheese id");
                continue;
            }
            records.push(cheese);
        }
        Self {
            cheeses: RwLock::new(records),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Cheese>>, StoreError> {
        self.cheeses.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Cheese>>, StoreError> {
        self.cheeses.write().map_err(|_| StoreError::Poisoned)
    }
}

impl CheeseStore for InMemoryCheeseStore {
    fn create(&self, cheese: Cheese) -> Result<Cheese, StoreError> {
        let mut cheeses = self.write()?;
        if cheeses.iter().any(|c| c.id == cheese.id) {
            return Err(StoreError::DuplicateId(cheese.id));
        }
        cheeses.push(cheese.clone());
        Ok(cheese)
    }

    fn get_all(&self) -> Result<Vec<Cheese>, StoreError> {
        Ok(self.read()?.clone())
    }

    fn get_by_id(&self, id: CheeseId) -> Result<Option<Cheese>, StoreError> {
        Ok(self.read()?.iter().find(|c| c.id == id).cloned())
    }

    fn update(&self, cheese: Cheese) -> Result<Cheese, StoreError> {
        let mut cheeses = self.write()?;
        let slot = cheeses
            .iter_mut()
            .find(|c| c.id == cheese.id)
            .ok_or(StoreError::NotFound(cheese.id))?;
        *slot = cheese.clone();
        Ok(cheese)
    }

    fn delete(&self, id: CheeseId) -> Result<(), StoreError> {
        let mut cheeses = self.write()?;
        let index = cheeses
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::NotFound(id))?;
        cheeses.remove(index);
        Ok(())
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }
}
