//! HTTP server configuration.
//!
//! Built once at process start (environment, optional `.env`, then CLI
//! overrides) and handed to the router by value.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use trivia_core::StoreConfig;

pub const ENV_DB_PATH: &str = "TRIVIA_DB_PATH";
pub const ENV_HOST: &str = "TRIVIA_HOST";
pub const ENV_PORT: &str = "TRIVIA_PORT";
pub const ENV_CORS_ORIGINS: &str = "TRIVIA_CORS_ORIGINS";
pub const ENV_BUSY_TIMEOUT_MS: &str = "TRIVIA_BUSY_TIMEOUT_MS";

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 5000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default)]
    pub store: StoreConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            store: StoreConfig::default(),
        }
    }
}

/// Invalid environment value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid value `{}` for {}", self.value, self.key)
    }
}

impl Error for ConfigError {}

/// Outcome of loading a `.env` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFile {
    Loaded(PathBuf),
    Missing,
    Invalid(String),
}

impl EnvFile {
    pub fn from_result(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => Self::Loaded(path),
            Err(err) if err.not_found() => Self::Missing,
            Err(err) => Self::Invalid(err.to_string()),
        }
    }
}

impl ServerConfig {
    /// Loads `.env` when present, then reads `TRIVIA_*` variables.
    ///
    /// An unreadable or malformed `.env` is logged and skipped.
    pub fn from_env() -> Result<Self, ConfigError> {
        match EnvFile::from_result(dotenvy::dotenv()) {
            EnvFile::Loaded(path) => info!(
                "event=config_load module=config status=ok env_file={}",
                path.display()
            ),
            EnvFile::Missing => {}
            EnvFile::Invalid(message) => warn!(
                "event=config_load module=config status=error error_code=env_file_invalid error={message}"
            ),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Blank values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = get(ENV_DB_PATH) {
            config.store.db_path = PathBuf::from(path);
        }
        if let Some(host) = get(ENV_HOST) {
            config.host = host;
        }
        if let Some(port) = get(ENV_PORT) {
            config.port = port.parse().map_err(|_| ConfigError {
                key: ENV_PORT,
                value: port.clone(),
            })?;
        }
        if let Some(timeout) = get(ENV_BUSY_TIMEOUT_MS) {
            config.store.busy_timeout_ms = timeout.parse().map_err(|_| ConfigError {
                key: ENV_BUSY_TIMEOUT_MS,
                value: timeout.clone(),
            })?;
        }
        if let Some(origins) = get(ENV_CORS_ORIGINS) {
            config.cors_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(config)
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
