use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache TTL configuration.
///
/// Every cached value carries a bounded staleness window; a zero TTL is a
/// configuration error, not "cache forever".
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// TTL for single-entity lookups, seconds (default: 300)
    #[serde(default = "default_entity_ttl_secs")]
    pub entity_ttl_secs: u64,

    /// TTL for list-shaped queries, seconds (default: 60)
    #[serde(default = "default_list_ttl_secs")]
    pub list_ttl_secs: u64,

    /// TTL for aggregate/statistics queries, seconds (default: 120)
    #[serde(default = "default_stats_ttl_secs")]
    pub stats_ttl_secs: u64,
}

impl CacheConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, secs) in [
            ("entity_ttl_secs", self.entity_ttl_secs),
            ("list_ttl_secs", self.list_ttl_secs),
            ("stats_ttl_secs", self.stats_ttl_secs),
        ] {
            if secs == 0 {
                return Err(DomainError::Config(format!("cache.{name} must be > 0")));
            }
        }
        Ok(())
    }

    pub fn entity_ttl(&self) -> Duration {
        Duration::from_secs(self.entity_ttl_secs)
    }

    pub fn list_ttl(&self) -> Duration {
        Duration::from_secs(self.list_ttl_secs)
    }

    pub fn stats_ttl(&self) -> Duration {
        Duration::from_secs(self.stats_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            entity_ttl_secs: default_entity_ttl_secs(),
            list_ttl_secs: default_list_ttl_secs(),
            stats_ttl_secs: default_stats_ttl_secs(),
        }
    }
}

fn default_entity_ttl_secs() -> u64 {
    300
}

fn default_list_ttl_secs() -> u64 {
    60
}

fn default_stats_ttl_secs() -> u64 {
    120
}
