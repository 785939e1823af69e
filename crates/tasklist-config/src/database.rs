//! libSQL database configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "tasklist.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the local database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the database lives only in memory for the process lifetime.
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_file() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, "tasklist.db");
        assert!(!config.is_in_memory());
    }

    #[test]
    fn memory_path_detected() {
        let config = DatabaseConfig {
            path: ":memory:".into(),
        };
        assert!(config.is_in_memory());
    }
}
