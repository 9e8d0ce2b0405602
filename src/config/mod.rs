//! # Service Configuration
//!
//! Explicit, validated configuration for the scoring service. Every section
//! has complete defaults so the server starts with no config file at all;
//! a TOML file and `SCORING_`-prefixed environment variables layer on top.

pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub use loader::load_config;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Root configuration for the scoring service.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub web: WebConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebConfig {
    /// Address the listener binds, e.g. `127.0.0.1:8080`.
    pub bind_address: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Cache store settings: which backend, and the retry budget the resilient
/// wrapper applies on top of it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// `redis` or `memory`. Unknown values fall back to `memory` with a
    /// warning (the service never fails to start over cache issues).
    pub backend: String,

    /// Redis connection URL, used when `backend = "redis"`.
    pub redis_url: String,

    /// Per-operation timeout against the remote cache.
    pub operation_timeout_ms: u64,

    /// Bounded retry attempt count for transient faults.
    pub retry_attempts: u32,

    /// Linear backoff base: attempt `i` sleeps `i * base` before retrying.
    pub retry_base_delay_ms: u64,

    /// Capacity of the in-process memoization table for `cache_get`.
    pub memo_capacity: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            operation_timeout_ms: 1_000,
            retry_attempts: 3,
            retry_base_delay_ms: 100,
            memo_capacity: 10,
        }
    }
}

impl StoreConfig {
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    pub fn retry_base_delay(&self) -> Duration {
        Duration::from_millis(self.retry_base_delay_ms)
    }
}

/// Logging settings; the `--log` CLI option overrides `file`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Optional JSON log file path.
    pub file: Option<String>,
}

impl ServiceConfig {
    /// Validate cross-field constraints the type system cannot express.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.store.retry_attempts == 0 {
            return Err(ConfigurationError::Invalid(
                "store.retry_attempts must be at least 1".to_string(),
            ));
        }
        if self.store.memo_capacity == 0 {
            return Err(ConfigurationError::Invalid(
                "store.memo_capacity must be at least 1".to_string(),
            ));
        }
        if self.web.bind_address.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigurationError::Invalid(format!(
                "web.bind_address is not a socket address: {}",
                self.web.bind_address
            )));
        }
        Ok(())
    }
}
