//! Server configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite file for durable state. `None` keeps state in memory.
    pub db_path: Option<PathBuf>,
    pub daily_retention_days: Option<u64>,
    /// Snapshot loaded into the store at startup.
    pub import_path: Option<PathBuf>,
    /// Snapshot written after graceful shutdown.
    pub export_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            db_path: None,
            daily_retention_days: None,
            import_path: None,
            export_path: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let port = match get("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "a valid port number",
                value,
            })?,
            None => defaults.port,
        };

        let daily_retention_days = match get("REVIEW_DAILY_RETENTION_DAYS") {
            Some(value) => Some(value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "REVIEW_DAILY_RETENTION_DAYS",
                expected: "a whole number of days",
                value,
            })?),
            None => None,
        };

        Ok(Self {
            host: get("REVIEW_HOST").unwrap_or(defaults.host),
            port,
            db_path: get("REVIEW_DB_PATH").map(PathBuf::from),
            daily_retention_days,
            import_path: get("REVIEW_IMPORT_PATH").map(PathBuf::from),
            export_path: get("REVIEW_EXPORT_PATH").map(PathBuf::from),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: "REVIEW_HOST",
                expected: "an IP address",
                value: self.host.clone(),
            })
    }
}
