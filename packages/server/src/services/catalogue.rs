use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::{Cheese, CheeseId, CheeseStore, Picture};
use tracing::{debug, info};

use super::error::CatalogueError;
use crate::models::cheese::CheeseResponse;

/// Picture content as returned by [`CatalogueService::get_cheese_picture`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheesePicture {
    /// Stored bytes, base64-encoded with the standard alphabet.
    Encoded(String),
    /// A stored reference, returned as-is.
    Reference(String),
}

impl CheesePicture {
    pub fn as_str(&self) -> &str {
        match self {
            CheesePicture::Encoded(s) | CheesePicture::Reference(s) => s,
        }
    }
}

/// Business rules over the cheese store.
///
/// Every record leaving the service is projected into a [`CheeseResponse`],
/// including the results of create and update.
#[derive(Clone)]
pub struct CatalogueService {
    store: Arc<dyn CheeseStore>,
}

impl CatalogueService {
    pub fn new(store: Arc<dyn CheeseStore>) -> Self {
        Self { store }
    }

    pub fn create_cheese(&self, cheese: Cheese) -> Result<CheeseResponse, CatalogueError> {
        if self.store.get_by_id(cheese.id)?.is_some() {
            return Err(CatalogueError::DuplicateId(cheese.id));
        }
        let created = self.store.create(cheese)?;
        info!(id = created.id, name = %created.name, "Cheese created");
        Ok(created.into())
    }

    pub fn get_cheeses(&self) -> Result<Vec<CheeseResponse>, CatalogueError> {
        Ok(self
            .store
            .get_all()?
            .into_iter()
            .map(CheeseResponse::from)
            .collect())
    }

    pub fn get_cheese(&self, id: CheeseId) -> Result<Option<CheeseResponse>, CatalogueError> {
        Ok(self.store.get_by_id(id)?.map(CheeseResponse::from))
    }

    pub fn get_cheese_price(&self, id: CheeseId) -> Result<f64, CatalogueError> {
        Ok(self.find(id)?.price_per_kilo)
    }

    /// Picture of a cheese, or `None` when the cheese or its picture is absent.
    pub fn get_cheese_picture(
        &self,
        id: CheeseId,
    ) -> Result<Option<CheesePicture>, CatalogueError> {
        let picture = self
            .store
            .get_by_id(id)?
            .and_then(|c| c.picture)
            .map(|p| match p {
                Picture::Bytes(bytes) => CheesePicture::Encoded(STANDARD.encode(bytes)),
                Picture::Reference(reference) => CheesePicture::Reference(reference),
            });
        Ok(picture)
    }

    /// Replace a cheese wholesale.
    pub fn update_cheese(&self, cheese: Cheese) -> Result<CheeseResponse, CatalogueError> {
        self.find(cheese.id)?;
        let updated = self.store.update(cheese)?;
        info!(id = updated.id, "Cheese updated");
        Ok(updated.into())
    }

    pub fn delete_cheese(&self, id: CheeseId) -> Result<(), CatalogueError> {
        self.store.delete(id)?;
        info!(id, "Cheese deleted");
        Ok(())
    }

    /// Total price of `weight_in_kilos` of a cheese.
    pub fn calculate_cheese_cost(
        &self,
        id: CheeseId,
        weight_in_kilos: f64,
    ) -> Result<f64, CatalogueError> {
        if !weight_in_kilos.is_finite() || weight_in_kilos < 0.0 {
            return Err(CatalogueError::InvalidInput("Invalid weight".into()));
        }
        let cheese = self.find(id)?;
        let total = cheese.price_per_kilo * weight_in_kilos;
        debug!(id, weight_in_kilos, total, "Computed cheese cost");
        Ok(total)
    }

    fn find(&self, id: CheeseId) -> Result<Cheese, CatalogueError> {
        self.store.get_by_id(id)?.ok_or(CatalogueError::NotFound)
    }
}
