//! Configuration parsing for the picnic server.
//!
//! Supports:
//! - CLI arguments via clap
//! - Environment variable overrides
//! - Sensible defaults for quick start

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::storage::{LinkPolicy, StorageConfig};

/// Picnic: plan picnics, who comes, and what they bring.
#[derive(Parser, Debug, Clone)]
#[command(name = "picnic")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "PICNIC_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PICNIC_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Path of the SQLite database file
    #[arg(short, long, env = "PICNIC_DATABASE", default_value = "./data/picnic.db")]
    pub database: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Size of the SQLite connection pool
    #[arg(long, env = "PICNIC_POOL_SIZE", default_value_t = 8)]
    pub pool_size: u32,

    /// How long a write waits on a locked database, in milliseconds
    #[arg(long, env = "PICNIC_BUSY_TIMEOUT_MS", default_value_t = 5000)]
    pub busy_timeout_ms: u64,

    /// Enforce foreign keys on association and contribution rows
    #[arg(long, env = "PICNIC_ENFORCE_FOREIGN_KEYS")]
    pub enforce_foreign_keys: bool,

    /// Refuse to link a user to a picnic twice
    #[arg(long, env = "PICNIC_REJECT_DUPLICATE_LINKS")]
    pub reject_duplicate_links: bool,

    /// OpenTelemetry collector endpoint for metrics export (optional)
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otel_endpoint: Option<String>,
}

impl Config {
    /// Parse configuration from CLI arguments and environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Storage settings derived from this configuration.
    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            pool_size: self.pool_size,
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
            enforce_foreign_keys: self.enforce_foreign_keys,
            link_policy: if self.reject_duplicate_links {
                LinkPolicy::Reject
            } else {
                LinkPolicy::Allow
            },
        }
    }

    /// Create a configuration for testing.
    pub fn test_config(database: PathBuf) -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 0, // Random port
            database,
            log_level: "debug".into(),
            pool_size: 4,
            busy_timeout_ms: 1000,
            enforce_foreign_keys: false,
            reject_duplicate_links: false,
            otel_endpoint: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            database: PathBuf::from("./data/picnic.db"),
            log_level: "info".into(),
            pool_size: 8,
            busy_timeout_ms: 5000,
            enforce_foreign_keys: false,
            reject_duplicate_links: false,
            otel_endpoint: None,
        }
    }
}
