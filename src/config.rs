//! Runtime settings from the environment.

use std::env;

/// Server settings. `DATABASE_URL` defaults to a local file database;
/// `BIND_ADDR` defaults to all interfaces on port 3000.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://campus.db".into()),
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
        }
    }
}
