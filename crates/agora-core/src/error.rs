//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business rule failures on the product aggregate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Product already liked")]
    AlreadyLiked,

    #[error("Product has not yet been liked")]
    NotLiked,

    #[error("User not authorized")]
    NotAuthorized,

    #[error("Bid must be higher than the product price of {minimum}")]
    BidTooLow { offered: f64, minimum: f64 },

    #[error("Bid must be higher than the highest bid of {highest}")]
    BidNotHighest { offered: f64, highest: f64 },

    #[error("Product {id} was modified concurrently, please retry")]
    Conflict { id: Uuid },
}

impl DomainError {
    /// Single-message validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    pub fn product_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "product",
            id,
        }
    }

    pub fn comment_not_found(id: Uuid) -> Self {
        Self::NotFound {
            entity_type: "comment",
            id,
        }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// The stored revision no longer matches the one the caller loaded.
    #[error("Revision conflict: expected revision {expected}")]
    Conflict { expected: u64 },

    #[error("Document (de)serialization failed: {0}")]
    Serialization(String),
}

/// Errors surfaced by [`crate::ProductService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}
