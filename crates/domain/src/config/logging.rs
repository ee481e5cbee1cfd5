use crate::errors::DomainError;
use serde::{Deserialize, Serialize};

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Logging configuration.
///
/// Consumed by the embedding host binary when it installs its tracing
/// subscriber; the library crates only emit events and never build a
/// subscriber themselves.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level for the pressbase crates (default: "info")
    /// Options: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log level for sqlx statement logging (default: "warn"). Statement
    /// logs include rendered SQL, so they stay quiet unless turned up.
    #[serde(default = "default_sqlx_level")]
    pub sqlx_level: String,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, level) in [("level", &self.level), ("sqlx_level", &self.sqlx_level)] {
            if !LEVELS.contains(&level.as_str()) {
                return Err(DomainError::Config(format!(
                    "logging.{name} '{level}' is not one of {LEVELS:?}"
                )));
            }
        }
        Ok(())
    }

    /// Env-filter directive string for the host's tracing subscriber:
    /// pressbase crates at `level`, sqlx at `sqlx_level`, everything else
    /// at warn.
    pub fn filter_directive(&self) -> String {
        format!(
            "warn,pressbase_domain={level},pressbase_application={level},\
             pressbase_infrastructure={level},sqlx={sqlx}",
            level = self.level,
            sqlx = self.sqlx_level,
        )
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            sqlx_level: default_sqlx_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_sqlx_level() -> String {
    "warn".to_string()
}
