use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Product;
use crate::error::RepoError;

/// Generic repository trait for whole-document persistence.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update) and return the stored version.
    async fn save(&self, entity: T) -> Result<T, RepoError>;
}

/// Product repository.
///
/// `save` is an optimistic write: it must fail with [`RepoError::Conflict`]
/// when the stored revision differs from `product.revision()`, and on
/// success return the product with its revision advanced by one.
#[async_trait]
pub trait ProductRepository: BaseRepository<Product, Uuid> {
    /// All listings, newest first.
    async fn find_all(&self) -> Result<Vec<Product>, RepoError>;
}
