use std::{env, fmt::Display, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            database_url: try_load(&lookup, "DATABASE_URL", "sqlite://games.db")?,
            host: try_load(&lookup, "HOST", "0.0.0.0")?,
            port: try_load(&lookup, "PORT", "5001")?,
            max_connections: try_load(&lookup, "DB_MAX_CONNECTIONS", "5")?,
            acquire_timeout: Duration::from_secs(try_load(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                "5",
            )?),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key: key.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        }
    })
}
