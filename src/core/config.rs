//! Configuration management for chirp
//!
//! Settings are layered: a TOML file (optional), then environment variables,
//! then CLI overrides applied by `main`. Validation runs once after all
//! layers so a missing listen address or store URL fails startup fast
//! instead of the process listening on an undefined port.

use crate::core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;

/// Default config file probed when no `--config` is given
const DEFAULT_CONFIG_FILE: &str = "chirp.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Document store configuration
    pub store: StoreConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP listen address; required, no default
    pub listen_addr: Option<SocketAddr>,
}

/// Document store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Storage backend type
    pub backend: StoreBackend,

    /// Connection string; required for the mongodb backend
    pub url: Option<String>,

    /// Database name override when the connection string names none
    pub database: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Storage backend type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-memory backend, for development and tests
    Memory,
    /// MongoDB backend (the default)
    #[default]
    Mongodb,
}

impl FromStr for StoreBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "memory" => Ok(StoreBackend::Memory),
            "mongodb" => Ok(StoreBackend::Mongodb),
            other => Err(Error::config(format!(
                "invalid store backend: {}. Valid options: memory, mongodb",
                other
            ))),
        }
    }
}

impl Config {
    /// Load configuration from the default file (if present) and environment
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() {
            config = Self::from_file(DEFAULT_CONFIG_FILE)?;
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            Error::config(format!(
                "failed to read config file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        toml::from_str(&contents)
            .map_err(|e| Error::config(format!("failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        use std::env;

        // PORT mirrors the conventional platform variable: listen on all
        // interfaces at that port.
        if let Ok(port) = env::var("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|e| Error::config(format!("invalid PORT: {}", e)))?;
            self.server.listen_addr = Some(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)));
        }

        if let Ok(addr) = env::var("CHIRP_LISTEN_ADDR") {
            self.server.listen_addr = Some(
                addr.parse()
                    .map_err(|e| Error::config(format!("invalid listen address: {}", e)))?,
            );
        }

        if let Ok(url) = env::var("DATABASE_URL") {
            self.store.url = Some(url);
        }

        if let Ok(backend) = env::var("CHIRP_STORE_BACKEND") {
            self.store.backend = backend.parse()?;
        }

        if let Ok(database) = env::var("CHIRP_DATABASE") {
            self.store.database = Some(database);
        }

        if let Ok(level) = env::var("CHIRP_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Validate configuration values; called after all override layers
    pub fn validate(&self) -> Result<()> {
        if self.server.listen_addr.is_none() {
            return Err(Error::config(
                "no listen address configured: set PORT, CHIRP_LISTEN_ADDR, \
                 server.listen_addr, or --listen-addr",
            ));
        }

        if self.store.backend == StoreBackend::Mongodb && self.store.url.is_none() {
            return Err(Error::config(
                "no store URL configured: set DATABASE_URL, store.url, or --database-url",
            ));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(Error::config(format!("invalid log level: {}", other)));
            }
        }

        Ok(())
    }

    /// The validated listen address
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.server
            .listen_addr
            .ok_or_else(|| Error::config("no listen address configured"))
    }
}

impl StoreConfig {
    /// The validated connection string
    pub fn url(&self) -> Result<&str> {
        self.url
            .as_deref()
            .ok_or_else(|| Error::config("no store URL configured"))
    }
}
