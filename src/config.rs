//! Application configuration, selected once at startup and immutable afterwards.

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;

/// Mode name that selects the testing configuration. Any other name selects production.
pub const TESTING_MODE: &str = "testing";

const DEFAULT_MODE: &str = "development";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite://items.db";
const MEMORY_DATABASE_URL: &str = "sqlite::memory:";
const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigMode {
    Testing,
    Production,
}

impl ConfigMode {
    /// `"testing"` selects testing mode; every other name selects production.
    pub fn from_name(name: &str) -> Self {
        if name.trim() == TESTING_MODE {
            ConfigMode::Testing
        } else {
            ConfigMode::Production
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub mode: ConfigMode,
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Maximum accepted request body, in bytes.
    pub body_limit: usize,
}

impl AppConfig {
    /// Config for a named mode with default storage: in-memory for testing, `items.db` otherwise.
    pub fn for_mode(name: &str) -> Self {
        let mode = ConfigMode::from_name(name);
        let database_url = match mode {
            ConfigMode::Testing => MEMORY_DATABASE_URL,
            ConfigMode::Production => DEFAULT_DATABASE_URL,
        };
        AppConfig {
            mode,
            database_url: database_url.to_string(),
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn testing() -> Self {
        Self::for_mode(TESTING_MODE)
    }

    /// Load from env: `APP_CONFIG`, `DATABASE_URL`, `BIND_ADDR`, `BODY_LIMIT_BYTES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let lookup = |key: &str| std::env::var(key).ok();
        Self::from_lookup(lookup)
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode_name = lookup("APP_CONFIG").unwrap_or_else(|| DEFAULT_MODE.into());
        let mut config = Self::for_mode(&mode_name);

        // Testing always stays in memory.
        if config.mode == ConfigMode::Production {
            if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
                config.database_url = url;
            }
        }

        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        config.bind_addr = SocketAddr::from_str(bind.trim())
            .map_err(|_| ConfigError::InvalidBindAddr(bind.clone()))?;

        if let Some(limit) = lookup("BODY_LIMIT_BYTES") {
            config.body_limit = limit.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "BODY_LIMIT_BYTES",
                value: limit.clone(),
            })?;
        }
        Ok(config)
    }

    /// Exposed through `/config-status`.
    pub fn debug_mode(&self) -> bool {
        self.mode == ConfigMode::Testing
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_url.contains(":memory:")
    }
}
