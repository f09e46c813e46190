//! The entity provider seam.

use crate::entity::Entity;
use crate::error::ProviderError;

/// Source of random entities for new rounds.
///
/// Retries, timeouts, and transport details belong to the implementation;
/// the game only sees an entity or an error.
pub trait EntityProvider {
    /// Pick a random entity from the catalog.
    fn fetch_random_entity(&mut self) -> Result<Entity, ProviderError>;
}

impl<T: EntityProvider + ?Sized> EntityProvider for Box<T> {
    fn fetch_random_entity(&mut self) -> Result<Entity, ProviderError> {
        (**self).fetch_random_entity()
    }
}
