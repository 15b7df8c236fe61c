//! In-memory product store - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use agora_core::domain::{Product, ProductState};
use agora_core::error::RepoError;
use agora_core::ports::{BaseRepository, ProductRepository};

/// Product repository backed by a HashMap behind an async RwLock.
///
/// Applies the same revision check as the PostgreSQL store.
/// Note: Data is lost on process restart.
pub struct InMemoryProductRepository {
    store: RwLock<HashMap<Uuid, ProductState>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Product, Uuid> for InMemoryProductRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned().map(Product::from))
    }

    async fn save(&self, product: Product) -> Result<Product, RepoError> {
        let expected = product.revision();
        let mut store = self.store.write().await;

        let stored = store.get(&product.id()).map(|state| state.revision).unwrap_or(0);
        if stored != expected {
            return Err(RepoError::Conflict { expected });
        }

        let mut state = ProductState::from(product);
        state.revision = expected + 1;
        store.insert(state.id, state.clone());

        Ok(Product::from(state))
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, RepoError> {
        let store = self.store.read().await;
        let mut products: Vec<Product> = store.values().cloned().map(Product::from).collect();
        products.sort_by(|a, b| b.start_date().cmp(&a.start_date()));
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use agora_core::domain::{Actor, NewProduct};

    use super::*;

    fn listing(title: &str) -> Product {
        let owner = Actor::new(Uuid::new_v4(), "owner", None);
        Product::create(
            &owner,
            NewProduct {
                title: Some(title.to_string()),
                description: Some("desc".to_string()),
                price: Some(10.0),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = InMemoryProductRepository::new();
        let product = listing("lamp");

        let saved = repo.save(product.clone()).await.unwrap();

        assert_eq!(saved.revision(), 1);
        let found = repo.find_by_id(product.id()).await.unwrap().unwrap();
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repo = InMemoryProductRepository::new();

        assert_eq!(repo.find_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_stale_save_conflicts() {
        let repo = InMemoryProductRepository::new();
        let saved = repo.save(listing("lamp")).await.unwrap();
        let id = saved.id();
        let fan = Actor::new(Uuid::new_v4(), "fan", None);

        let mut first = saved.clone();
        first.add_like(&fan).unwrap();
        repo.save(first).await.unwrap();

        let mut stale = saved;
        stale.add_comment(&fan, "late".to_string()).unwrap();
        let result = repo.save(stale).await;

        assert!(matches!(result, Err(RepoError::Conflict { expected: 1 })));
        let stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.revision(), 2);
        assert!(stored.comments().is_empty());
    }

    #[tokio::test]
    async fn test_resaving_new_product_conflicts() {
        let repo = InMemoryProductRepository::new();
        let product = listing("lamp");
        repo.save(product.clone()).await.unwrap();

        let result = repo.save(product).await;

        assert!(matches!(result, Err(RepoError::Conflict { expected: 0 })));
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let repo = InMemoryProductRepository::new();
        let older = repo.save(listing("older")).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let newer = repo.save(listing("newer")).await.unwrap();

        let all = repo.find_all().await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id(), newer.id());
        assert_eq!(all[1].id(), older.id());
    }
}
