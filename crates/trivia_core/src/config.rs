//! Store configuration passed explicitly into every unit of work.
//!
//! # Responsibility
//! - Describe where the SQLite store lives and how connections behave.
//! - Stay free of process-global state; callers build it once at startup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_DB_FILE_NAME: &str = "trivia.sqlite3";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Connection settings for the trivia store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file. Created on first open.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// How long a connection waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl StoreConfig {
    /// Creates a config for the given database file with default timeouts.
    pub fn with_db_path(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StoreConfig;

    #[test]
    fn default_points_into_temp_dir() {
        let config = StoreConfig::default();
        assert!(config.db_path.starts_with(std::env::temp_dir()));
        assert_eq!(config.busy_timeout_ms, 5_000);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"db_path":"/tmp/x.db"}"#).expect("valid config json");
        assert_eq!(config.db_path.to_str(), Some("/tmp/x.db"));
        assert_eq!(config.busy_timeout_ms, 5_000);
    }
}
