//! Gateway configuration.
//!
//! [`GatewayConfig`] derives `Deserialize` so hosts can embed a
//! `[gateway]`-style table in their own config files; every field has a
//! default, so an empty table is valid. [`GatewayConfig::from_env()`]
//! covers deployments that configure through the environment instead.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::{MuninnError, Result};

/// Configuration surface of the fetch gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Remote KV store address (e.g. `redis://redis:6379`). When set, the
    /// gateway caches through Redis; when unset, it falls back to the
    /// in-process TTL map. Decided once, at build time.
    #[serde(default)]
    pub remote_backend_address: Option<String>,

    /// TTL applied when a caller omits one (default: 300).
    #[serde(default = "default_ttl_seconds")]
    pub default_ttl_seconds: u64,

    /// Per-attempt upstream timeout (default: 15).
    #[serde(default = "default_http_timeout_seconds")]
    pub http_timeout_seconds: u64,

    /// Retries after the initial attempt (default: 2).
    #[serde(default = "default_http_max_retries")]
    pub http_max_retries: u32,

    /// Backoff base delay; the delay before retry `n` is
    /// `base * 2^n` (default: 0.5).
    #[serde(default = "default_http_retry_base_delay_seconds")]
    pub http_retry_base_delay_seconds: f64,
}

fn default_ttl_seconds() -> u64 {
    300
}

fn default_http_timeout_seconds() -> u64 {
    15
}

fn default_http_max_retries() -> u32 {
    2
}

fn default_http_retry_base_delay_seconds() -> f64 {
    0.5
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            remote_backend_address: None,
            default_ttl_seconds: default_ttl_seconds(),
            http_timeout_seconds: default_http_timeout_seconds(),
            http_max_retries: default_http_max_retries(),
            http_retry_base_delay_seconds: default_http_retry_base_delay_seconds(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from the environment.
    ///
    /// Recognized variables: `MUNINN_REDIS_URL`, `MUNINN_CACHE_TTL_SECONDS`,
    /// `MUNINN_HTTP_TIMEOUT_SECONDS`, `MUNINN_HTTP_MAX_RETRIES`,
    /// `MUNINN_HTTP_RETRY_BASE_DELAY_SECONDS`. Unset variables keep their
    /// defaults; unparseable values are a configuration error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            remote_backend_address: lookup("MUNINN_REDIS_URL"),
            default_ttl_seconds: parse_or("MUNINN_CACHE_TTL_SECONDS", &lookup, default_ttl_seconds)?,
            http_timeout_seconds: parse_or(
                "MUNINN_HTTP_TIMEOUT_SECONDS",
                &lookup,
                default_http_timeout_seconds,
            )?,
            http_max_retries: parse_or(
                "MUNINN_HTTP_MAX_RETRIES",
                &lookup,
                default_http_max_retries,
            )?,
            http_retry_base_delay_seconds: parse_or(
                "MUNINN_HTTP_RETRY_BASE_DELAY_SECONDS",
                &lookup,
                default_http_retry_base_delay_seconds,
            )?,
        })
    }

    /// Default TTL as a duration.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_seconds)
    }

    /// Per-attempt timeout as a duration.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    /// Backoff base delay as a duration.
    ///
    /// Errors on a negative or non-finite value.
    pub fn retry_base_delay(&self) -> Result<Duration> {
        Duration::try_from_secs_f64(self.http_retry_base_delay_seconds).map_err(|e| {
            MuninnError::Configuration(format!(
                "invalid http_retry_base_delay_seconds {}: {e}",
                self.http_retry_base_delay_seconds
            ))
        })
    }
}

fn parse_or<T>(
    name: &str,
    lookup: impl Fn(&str) -> Option<String>,
    default: fn() -> T,
) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| MuninnError::Configuration(format!("invalid {name} value {raw:?}: {e}"))),
        None => Ok(default()),
    }
}
