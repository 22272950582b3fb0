//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `VIP_LIFECYCLE` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use vip_lifecycle::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod auth;
mod database;
mod error;
mod rest;
mod server;
mod store;
mod sweep;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use rest::RestConfig;
pub use server::{Environment, ServerConfig};
pub use store::{StoreBackend, StoreConfig};
pub use sweep::SweepConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
/// Only the section for the selected store backend is validated.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Profile store backend selection
    #[serde(default)]
    pub store: StoreConfig,

    /// PostgreSQL connection, used by the `postgres` backend
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Hosted REST endpoint, used by the `rest` backend
    #[serde(default)]
    pub rest: RestConfig,

    /// Session token verification
    pub auth: AuthConfig,

    /// Background expiration sweep
    #[serde(default)]
    pub sweep: SweepConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `VIP_LIFECYCLE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `VIP_LIFECYCLE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `VIP_LIFECYCLE__STORE__BACKEND=rest` -> `store.backend = rest`
    /// - `VIP_LIFECYCLE__AUTH__JWT_SECRET=...` -> `auth.jwt_secret = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("VIP_LIFECYCLE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        match self.store.backend {
            StoreBackend::Postgres => self.database.validate()?,
            StoreBackend::Rest => self.rest.validate(&self.server.environment)?,
            StoreBackend::Memory if self.is_production() => {
                return Err(ValidationError::MemoryStoreInProduction)
            }
            StoreBackend::Memory => {}
        }
        self.auth.validate()?;
        self.sweep.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
