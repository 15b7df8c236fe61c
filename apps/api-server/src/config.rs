//! Application configuration loaded from environment variables.

use std::env;

use agora_core::service::DEFAULT_MAX_ATTEMPTS;
use agora_infra::{DatabaseConfig, JwtConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory product store.
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    /// Load-mutate-save attempts per request before answering 409.
    pub max_update_attempts: u32,
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS", 100),
            min_connections: parse_var("DB_MIN_CONNECTIONS", 10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080),
            database,
            jwt: JwtConfig::from_env(),
            max_update_attempts: parse_var("UPDATE_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS),
        }
    }
}
