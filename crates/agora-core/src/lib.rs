//! # Agora Core
//!
//! The domain layer of the Agora marketplace.
//! This crate contains the product aggregate and its rules, the ports
//! infrastructure must implement, and the service that drives the
//! load-mutate-save round trip. It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError, ServiceError};
pub use service::ProductService;
