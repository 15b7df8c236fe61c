//! Application state - shared across all handlers.

use std::sync::Arc;

use agora_core::ProductService;
use agora_core::ports::{IdentityProvider, ProductRepository};
use agora_infra::{InMemoryProductRepository, JwtIdentityProvider};

#[cfg(feature = "postgres")]
use agora_infra::PostgresProductRepository;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn with_repository(
        repo: Arc<dyn ProductRepository>,
        identity: Arc<dyn IdentityProvider>,
        max_update_attempts: u32,
    ) -> Self {
        Self {
            products: ProductService::new(repo).with_max_attempts(max_update_attempts),
            identity,
        }
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let repo = Self::product_repository(config).await?;
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(JwtIdentityProvider::new(config.jwt.clone()));

        tracing::info!("Application state initialized");

        Ok(Self::with_repository(
            repo,
            identity,
            config.max_update_attempts,
        ))
    }

    #[cfg(feature = "postgres")]
    async fn product_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn ProductRepository>> {
        use anyhow::Context;

        match &config.database {
            Some(db_config) => {
                let conn = agora_infra::database::connect(db_config)
                    .await
                    .context("failed to connect to the product database")?;
                Ok(Arc::new(PostgresProductRepository::new(conn)))
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Ok(Arc::new(InMemoryProductRepository::new()))
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn product_repository(config: &AppConfig) -> anyhow::Result<Arc<dyn ProductRepository>> {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without postgres feature");
        }
        tracing::info!("Running without postgres feature - using in-memory repository");
        Ok(Arc::new(InMemoryProductRepository::new()))
    }
}
