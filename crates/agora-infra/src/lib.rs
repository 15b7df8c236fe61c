//! # Agora Infrastructure
//!
//! Concrete implementations of the ports defined in `agora-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL product store via SeaORM
//! - `auth` - JWT identity provider

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::{DatabaseConfig, InMemoryProductRepository};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtIdentityProvider};

#[cfg(feature = "postgres")]
pub use database::PostgresProductRepository;
