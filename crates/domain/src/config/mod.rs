//! Configuration, organized per concern:
//! - `database`: SQLite path and pool sizing
//! - `cache`: TTL windows per query shape
//! - `logging`: log level

pub mod cache;
pub mod database;
pub mod logging;

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use logging::LoggingConfig;

use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Config(format!("Cannot read {}: {e}", path.display())))?;
        let config: Config = toml::from_str(&raw)
            .map_err(|e| DomainError::Config(format!("Cannot parse {}: {e}", path.display())))?;
        config.cache.validate()?;
        config.logging.validate()?;
        Ok(config)
    }
}
