//! Authentication port.

use crate::domain::Actor;

/// Resolves a bearer credential into the caller's identity.
///
/// The core never authenticates anyone itself; it trusts whatever
/// [`Actor`] this returns.
pub trait IdentityProvider: Send + Sync {
    fn identify(&self, token: &str) -> Result<Actor, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,
}
