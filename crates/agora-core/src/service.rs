//! Product service - drives the load, mutate, save round trip.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Actor, NewProduct, Product};
use crate::error::{DomainError, RepoError, ServiceError};
use crate::ports::ProductRepository;

/// Default number of load-mutate-save attempts before giving up on a
/// contended product.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Application service for product listings.
///
/// Each mutating call loads the product, applies exactly one aggregate
/// operation and saves the whole document back. When the save loses a
/// revision race the whole round trip is re-run against the fresh state,
/// so preconditions such as "bid must beat the highest bid" are always
/// checked against what actually got stored.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
    max_attempts: u32,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self {
            repo,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub async fn create(&self, owner: &Actor, draft: NewProduct) -> Result<Product, ServiceError> {
        let product = Product::create(owner, draft)?;
        let saved = self.repo.save(product).await?;

        tracing::info!(product_id = %saved.id(), owner_id = %owner.user_id, "Product listed");
        Ok(saved)
    }

    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.repo.find_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Product, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::product_not_found(id).into())
    }

    pub async fn like(&self, id: Uuid, actor: &Actor) -> Result<Product, ServiceError> {
        let saved = self
            .update(id, |product| product.add_like(actor).map(drop))
            .await?;

        tracing::info!(product_id = %id, user_id = %actor.user_id, "Product liked");
        Ok(saved)
    }

    pub async fn unlike(&self, id: Uuid, actor: &Actor) -> Result<Product, ServiceError> {
        let saved = self
            .update(id, |product| product.remove_like(actor.user_id).map(drop))
            .await?;

        tracing::info!(product_id = %id, user_id = %actor.user_id, "Product unliked");
        Ok(saved)
    }

    pub async fn comment(
        &self,
        id: Uuid,
        actor: &Actor,
        text: String,
    ) -> Result<Product, ServiceError> {
        let saved = self
            .update(id, |product| product.add_comment(actor, text.clone()).map(drop))
            .await?;

        tracing::info!(product_id = %id, user_id = %actor.user_id, "Comment added");
        Ok(saved)
    }

    pub async fn delete_comment(
        &self,
        id: Uuid,
        comment_id: Uuid,
        actor: &Actor,
    ) -> Result<Product, ServiceError> {
        let saved = self
            .update(id, |product| {
                product.remove_comment(comment_id, actor.user_id).map(drop)
            })
            .await?;

        tracing::info!(product_id = %id, comment_id = %comment_id, "Comment removed");
        Ok(saved)
    }

    pub async fn bid(&self, id: Uuid, actor: &Actor, price: f64) -> Result<Product, ServiceError> {
        let saved = self
            .update(id, |product| product.place_bid(actor, price).map(drop))
            .await?;

        tracing::info!(product_id = %id, bidder_id = %actor.user_id, price, "Bid accepted");
        Ok(saved)
    }

    async fn update<F>(&self, id: Uuid, mut apply: F) -> Result<Product, ServiceError>
    where
        F: FnMut(&mut Product) -> Result<(), DomainError> + Send,
    {
        let mut attempt = 1;

        loop {
            let mut product = self.get(id).await?;
            apply(&mut product)?;

            match self.repo.save(product).await {
                Ok(saved) => return Ok(saved),
                Err(RepoError::Conflict { expected }) if attempt < self.max_attempts => {
                    tracing::debug!(
                        product_id = %id,
                        attempt,
                        expected,
                        "Revision conflict, retrying update"
                    );
                    attempt += 1;
                }
                Err(RepoError::Conflict { .. }) => {
                    tracing::warn!(product_id = %id, attempts = attempt, "Giving up on contended product");
                    return Err(DomainError::Conflict { id }.into());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::domain::ProductState;
    use crate::ports::BaseRepository;

    /// Minimal revision-checking store for exercising the service.
    #[derive(Default)]
    struct MemoryRepo {
        products: Mutex<HashMap<Uuid, ProductState>>,
        saves: AtomicU32,
    }

    #[async_trait]
    impl BaseRepository<Product, Uuid> for MemoryRepo {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
            let products = self.products.lock().unwrap();
            Ok(products.get(&id).cloned().map(Product::from))
        }

        async fn save(&self, product: Product) -> Result<Product, RepoError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            let mut products = self.products.lock().unwrap();
            let stored = products.get(&product.id()).map(|s| s.revision).unwrap_or(0);
            if stored != product.revision() {
                return Err(RepoError::Conflict {
                    expected: product.revision(),
                });
            }
            let mut state = ProductState::from(product);
            state.revision += 1;
            products.insert(state.id, state.clone());
            Ok(Product::from(state))
        }
    }

    #[async_trait]
    impl ProductRepository for MemoryRepo {
        async fn find_all(&self) -> Result<Vec<Product>, RepoError> {
            let products = self.products.lock().unwrap();
            Ok(products.values().cloned().map(Product::from).collect())
        }
    }

    /// Simulates a competing writer: the first `races` saves are preceded
    /// by someone else storing a higher bid.
    struct RacingRepo {
        inner: MemoryRepo,
        races: AtomicU32,
        rival: Actor,
        rival_price: f64,
    }

    #[async_trait]
    impl BaseRepository<Product, Uuid> for RacingRepo {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
            self.inner.find_by_id(id).await
        }

        async fn save(&self, product: Product) -> Result<Product, RepoError> {
            if self.races.load(Ordering::SeqCst) > 0 {
                self.races.fetch_sub(1, Ordering::SeqCst);
                let mut current = self.inner.find_by_id(product.id()).await?.unwrap();
                current.place_bid(&self.rival, self.rival_price).unwrap();
                self.inner.save(current).await?;
            }
            self.inner.save(product).await
        }
    }

    #[async_trait]
    impl ProductRepository for RacingRepo {
        async fn find_all(&self) -> Result<Vec<Product>, RepoError> {
            self.inner.find_all().await
        }
    }

    fn actor(name: &str) -> Actor {
        Actor::new(Uuid::new_v4(), name, None)
    }

    fn draft(price: f64) -> NewProduct {
        NewProduct {
            title: Some("Bike".to_string()),
            description: Some("Road bike, 56cm".to_string()),
            price: Some(price),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_persists_with_first_revision() {
        let repo = Arc::new(MemoryRepo::default());
        let service = ProductService::new(repo.clone());

        let product = service.create(&actor("owner"), draft(100.0)).await.unwrap();

        assert_eq!(product.revision(), 1);
        assert_eq!(service.get(product.id()).await.unwrap(), product);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_invalid_is_not_saved() {
        let repo = Arc::new(MemoryRepo::default());
        let service = ProductService::new(repo.clone());

        let result = service.create(&actor("owner"), NewProduct::default()).await;

        assert!(matches!(
            result,
            Err(ServiceError::Domain(DomainError::Validation(_)))
        ));
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_unknown_product_is_not_found() {
        let service = ProductService::new(Arc::new(MemoryRepo::default()));
        let id = Uuid::new_v4();

        let result = service.get(id).await;

        assert!(matches!(
            result,
            Err(ServiceError::Domain(DomainError::NotFound { entity_type: "product", .. }))
        ));
    }

    #[tokio::test]
    async fn test_mutations_are_persisted() {
        let service = ProductService::new(Arc::new(MemoryRepo::default()));
        let owner = actor("owner");
        let fan = actor("fan");
        let product = service.create(&owner, draft(10.0)).await.unwrap();
        let id = product.id();

        service.like(id, &fan).await.unwrap();
        service.comment(id, &fan, "Nice!".to_string()).await.unwrap();
        let saved = service.bid(id, &fan, 12.5).await.unwrap();

        let stored = service.get(id).await.unwrap();
        assert_eq!(stored, saved);
        assert_eq!(stored.revision(), 4);
        assert_eq!(stored.likes().len(), 1);
        assert_eq!(stored.comments()[0].text, "Nice!");
        assert_eq!(stored.bids()[0].price, 12.5);
    }

    #[tokio::test]
    async fn test_failed_precondition_does_not_save() {
        let repo = Arc::new(MemoryRepo::default());
        let service = ProductService::new(repo.clone());
        let product = service.create(&actor("owner"), draft(10.0)).await.unwrap();

        let result = service.unlike(product.id(), &actor("stranger")).await;

        assert!(matches!(
            result,
            Err(ServiceError::Domain(DomainError::NotLiked))
        ));
        assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_delete_comment_requires_author() {
        let service = ProductService::new(Arc::new(MemoryRepo::default()));
        let author = actor("author");
        let product = service.create(&actor("owner"), draft(10.0)).await.unwrap();
        let saved = service
            .comment(product.id(), &author, "hello".to_string())
            .await
            .unwrap();
        let comment_id = saved.comments()[0].id;

        let denied = service
            .delete_comment(product.id(), comment_id, &actor("other"))
            .await;
        assert!(matches!(
            denied,
            Err(ServiceError::Domain(DomainError::NotAuthorized))
        ));

        let saved = service
            .delete_comment(product.id(), comment_id, &author)
            .await
            .unwrap();
        assert!(saved.comments().is_empty());
    }

    #[tokio::test]
    async fn test_stale_bid_is_revalidated_after_conflict() {
        let repo = Arc::new(RacingRepo {
            inner: MemoryRepo::default(),
            races: AtomicU32::new(0),
            rival: actor("rival"),
            rival_price: 180.0,
        });
        let service = ProductService::new(repo.clone());
        let product = service.create(&actor("owner"), draft(100.0)).await.unwrap();

        repo.races.store(1, Ordering::SeqCst);
        let result = service.bid(product.id(), &actor("late"), 150.0).await;

        assert!(matches!(
            result,
            Err(ServiceError::Domain(DomainError::BidNotHighest { highest, .. })) if highest == 180.0
        ));
        let stored = service.get(product.id()).await.unwrap();
        assert_eq!(stored.bids().len(), 1);
        assert_eq!(stored.bids()[0].price, 180.0);
    }

    #[tokio::test]
    async fn test_winning_bid_survives_conflict() {
        let repo = Arc::new(RacingRepo {
            inner: MemoryRepo::default(),
            races: AtomicU32::new(0),
            rival: actor("rival"),
            rival_price: 120.0,
        });
        let service = ProductService::new(repo.clone());
        let product = service.create(&actor("owner"), draft(100.0)).await.unwrap();

        repo.races.store(1, Ordering::SeqCst);
        let saved = service.bid(product.id(), &actor("winner"), 150.0).await.unwrap();

        let prices: Vec<f64> = saved.bids().iter().map(|bid| bid.price).collect();
        assert_eq!(prices, vec![150.0, 120.0]);
    }

    /// Reports a conflict while `remaining` is positive.
    struct ConflictingRepo {
        inner: Arc<MemoryRepo>,
        remaining: AtomicU32,
    }

    #[async_trait]
    impl BaseRepository<Product, Uuid> for ConflictingRepo {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
            self.inner.find_by_id(id).await
        }

        async fn save(&self, product: Product) -> Result<Product, RepoError> {
            if self.remaining.load(Ordering::SeqCst) > 0 {
                self.remaining.fetch_sub(1, Ordering::SeqCst);
                return Err(RepoError::Conflict {
                    expected: product.revision(),
                });
            }
            self.inner.save(product).await
        }
    }

    #[async_trait]
    impl ProductRepository for ConflictingRepo {
        async fn find_all(&self) -> Result<Vec<Product>, RepoError> {
            self.inner.find_all().await
        }
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let memory = Arc::new(MemoryRepo::default());
        let product = ProductService::new(memory.clone())
            .create(&actor("owner"), draft(1.0))
            .await
            .unwrap();
        let id = product.id();
        let repo = Arc::new(ConflictingRepo {
            inner: memory,
            remaining: AtomicU32::new(5),
        });
        let service = ProductService::new(repo.clone()).with_max_attempts(2);

        let result = service.like(id, &actor("fan")).await;

        assert!(matches!(
            result,
            Err(ServiceError::Domain(DomainError::Conflict { id: conflicted })) if conflicted == id
        ));
        assert_eq!(repo.remaining.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_store_errors_are_not_retried() {
        struct BrokenRepo {
            inner: MemoryRepo,
            saves: AtomicU32,
        }

        #[async_trait]
        impl BaseRepository<Product, Uuid> for BrokenRepo {
            async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
                self.inner.find_by_id(id).await
            }

            async fn save(&self, product: Product) -> Result<Product, RepoError> {
                if self.saves.fetch_add(1, Ordering::SeqCst) == 0 {
                    return self.inner.save(product).await;
                }
                Err(RepoError::Connection("connection reset".to_string()))
            }
        }

        #[async_trait]
        impl ProductRepository for BrokenRepo {
            async fn find_all(&self) -> Result<Vec<Product>, RepoError> {
                self.inner.find_all().await
            }
        }

        let repo = Arc::new(BrokenRepo {
            inner: MemoryRepo::default(),
            saves: AtomicU32::new(0),
        });
        let service = ProductService::new(repo.clone());
        let product = service.create(&actor("owner"), draft(1.0)).await.unwrap();

        let result = service.like(product.id(), &actor("fan")).await;

        assert!(matches!(
            result,
            Err(ServiceError::Repo(RepoError::Connection(_)))
        ));
        assert_eq!(repo.saves.load(Ordering::SeqCst), 2);
    }
}
