//! Runtime configuration from the environment.

use std::time::Duration;

pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 7000;
pub const DEFAULT_DATABASE_PATH: &str = "fichas.db";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid server port: {0}")]
    InvalidPort(String),

    #[error("Invalid ROLL_DELAY_MS: {0}")]
    InvalidRollDelay(String),
}

/// Engine settings. Read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    /// `None` leaves CORS off
    pub cors_allowed_origins: Option<String>,
    /// Pause between starting and resolving a roll
    pub roll_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            database_path: DEFAULT_DATABASE_PATH.to_string(),
            cors_allowed_origins: None,
            roll_delay: Duration::ZERO,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let server_port = match var("SERVER_PORT").or_else(|| var("PORT")) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.server_port,
        };

        let roll_delay = match var("ROLL_DELAY_MS") {
            Some(raw) => Duration::from_millis(
                raw.parse::<u64>()
                    .map_err(|_| ConfigError::InvalidRollDelay(raw))?,
            ),
            None => defaults.roll_delay,
        };

        Ok(Self {
            server_host: var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port,
            database_path: var("DATABASE_PATH").unwrap_or(defaults.database_path),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
            roll_delay,
        })
    }
}
