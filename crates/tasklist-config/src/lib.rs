//! # tasklist-config
//!
//! Layered configuration loading for Tasklist using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TASKLIST_*` prefix, `__` as separator)
//! 2. Project-level `.tasklist/config.toml`
//! 3. User-level `~/.config/tasklist/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TASKLIST_DATABASE__PATH` -> `database.path`,
//! `TASKLIST_CLIENT__REFRESH_INTERVAL_SECS` -> `client.refresh_interval_secs`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tasklist_config::TasklistConfig;
//!
//! let config = TasklistConfig::load_with_dotenv().expect("config");
//! println!("serving on {}", config.server.bind_addr());
//! ```

mod client;
mod database;
mod error;
mod server;

pub use client::ClientConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TasklistConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

impl TasklistConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".tasklist/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("TASKLIST_").split("__"))
    }

    /// Reject values that would make the client or server misbehave.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(invalid("database.path", "must not be empty"));
        }
        if self.client.refresh_interval_secs == 0 {
            return Err(invalid("client.refresh_interval_secs", "must be greater than 0"));
        }
        if self.client.request_timeout_secs == 0 {
            return Err(invalid("client.request_timeout_secs", "must be greater than 0"));
        }
        if !(self.client.base_url.starts_with("http://")
            || self.client.base_url.starts_with("https://"))
        {
            return Err(invalid("client.base_url", "must start with http:// or https://"));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tasklist").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
