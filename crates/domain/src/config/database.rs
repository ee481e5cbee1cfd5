use serde::{Deserialize, Serialize};

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file (default: "./pressbase.db")
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Connection pool upper bound (default: 16)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_db_path() -> String {
    "./pressbase.db".to_string()
}

fn default_max_connections() -> u32 {
    16
}
