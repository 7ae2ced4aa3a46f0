//! Application configuration
//!
//! Loaded from a TOML file (`TABLEBOOK_CONFIG` env var or
//! `~/.config/tablebook/config.toml`). Every section and field has a
//! default, so a missing or partial file still yields a runnable config.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [logging]
//! level = "info"
//!
//! [booking]
//! default_duration_hours = 2
//! cancellation_policy = "soft_cancel"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// What `cancel` does to a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationPolicy {
    /// Keep the row, flip status to Cancelled (the default)
    SoftCancel,
    /// Remove the row entirely
    HardDelete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// REST API bind address
    pub host: String,
    /// REST API port
    pub port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
    /// Seed the store with a demo floor plan on startup
    pub seed_demo_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
            seed_demo_data: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Slot length applied when a booking does not specify one
    pub default_duration_hours: i64,
    /// Largest accepted party size
    pub max_party_size: i32,
    /// What cancelling a booking does to the stored row
    pub cancellation_policy: CancellationPolicy,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_duration_hours: 2,
            max_party_size: 20,
            cancellation_policy: CancellationPolicy::SoftCancel,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub booking: BookingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// REST API listen address as `host:port`
    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Default config location: `~/.config/tablebook/config.toml`
/// (falls back to the working directory when no home is available).
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("tablebook").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

// ── Tests ──────────────────────────────────────────────────────
