//! PostgreSQL product repository.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, SqlErr};
use uuid::Uuid;

use agora_core::domain::{Product, ProductState};
use agora_core::error::RepoError;
use agora_core::ports::{BaseRepository, ProductRepository};

use super::entity::product::{self, Entity as ProductEntity};

fn query_error(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
        _ => match err {
            DbErr::Conn(e) => RepoError::Connection(e.to_string()),
            DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
            other => RepoError::Query(other.to_string()),
        },
    }
}

/// PostgreSQL product repository with revision-checked writes.
pub struct PostgresProductRepository {
    db: DbConn,
}

impl PostgresProductRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BaseRepository<Product, Uuid> for PostgresProductRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, RepoError> {
        let result = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        result.map(Product::try_from).transpose()
    }

    async fn save(&self, product: Product) -> Result<Product, RepoError> {
        let expected = product.revision();
        let stored_revision = product::to_revision(expected)?;
        let mut state = ProductState::from(product);
        state.revision = expected + 1;
        let active = product::ActiveModel::try_from(&state)?;

        if expected == 0 {
            ProductEntity::insert(active)
                .exec_without_returning(&self.db)
                .await
                .map_err(query_error)?;
        } else {
            let result = ProductEntity::update_many()
                .set(active)
                .filter(product::Column::Id.eq(state.id))
                .filter(product::Column::Revision.eq(stored_revision))
                .exec(&self.db)
                .await
                .map_err(query_error)?;

            if result.rows_affected == 0 {
                tracing::debug!(product_id = %state.id, expected, "Stale product revision");
                return Err(RepoError::Conflict { expected });
            }
        }

        Ok(Product::from(state))
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, RepoError> {
        let models = ProductEntity::find()
            .order_by_desc(product::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        models.into_iter().map(Product::try_from).collect()
    }
}
