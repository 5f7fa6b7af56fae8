//! Builder for configuring gateway instances

use std::sync::Arc;
use std::time::Duration;

use super::FetchGateway;
use crate::Result;
use crate::backend::{CacheBackend, MemoryBackend, RedisBackend};
use crate::backoff::BackoffPolicy;
use crate::config::GatewayConfig;
use crate::fetcher::Fetcher;

/// Main entry point for creating gateway instances.
pub struct Muninn;

impl Muninn {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> MuninnBuilder {
        MuninnBuilder::new()
    }

    /// Build a gateway directly from a [`GatewayConfig`].
    pub fn from_config(config: &GatewayConfig) -> Result<FetchGateway> {
        MuninnBuilder::from_config(config)?.build()
    }
}

/// Builder for configuring gateway instances.
///
/// Backend selection happens exactly once, in [`build()`](Self::build):
/// a remote address selects the Redis backend, otherwise the in-process TTL
/// map is used. The choice is never re-evaluated per call. An explicitly
/// injected backend (via [`backend()`](Self::backend)) takes precedence over
/// both — the seam tests and embedders use to supply their own storage.
pub struct MuninnBuilder {
    remote_backend_address: Option<String>,
    backend: Option<Arc<dyn CacheBackend>>,
    default_ttl: Duration,
    base_delay: Duration,
    max_retries: u32,
    per_attempt_timeout: Duration,
}

impl MuninnBuilder {
    pub fn new() -> Self {
        let defaults = GatewayConfig::default();
        Self {
            remote_backend_address: None,
            backend: None,
            default_ttl: defaults.default_ttl(),
            base_delay: Duration::from_millis(500),
            max_retries: defaults.http_max_retries,
            per_attempt_timeout: defaults.http_timeout(),
        }
    }

    /// Seed the builder from a [`GatewayConfig`].
    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        let mut builder = Self::new()
            .default_ttl(config.default_ttl())
            .base_delay(config.retry_base_delay()?)
            .max_retries(config.http_max_retries)
            .per_attempt_timeout(config.http_timeout());
        if let Some(ref address) = config.remote_backend_address {
            builder = builder.remote_backend(address.clone());
        }
        Ok(builder)
    }

    /// Cache through a remote Redis instance at the given address.
    pub fn remote_backend(mut self, address: impl Into<String>) -> Self {
        self.remote_backend_address = Some(address.into());
        self
    }

    /// Inject a pre-constructed cache backend.
    ///
    /// Overrides address-based selection entirely.
    pub fn backend(mut self, backend: Arc<dyn CacheBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// TTL applied when a caller omits one.
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    /// Backoff base delay before the first retry.
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Retry budget after the initial attempt. 0 = single attempt.
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Per-attempt upstream timeout.
    pub fn per_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.per_attempt_timeout = timeout;
        self
    }

    /// Build the gateway.
    ///
    /// Constructs the backend handle once; it is shared by every concurrent
    /// call on the returned gateway (and its clones) for the process
    /// lifetime.
    pub fn build(self) -> Result<FetchGateway> {
        let backend: Arc<dyn CacheBackend> = match (self.backend, self.remote_backend_address) {
            (Some(backend), _) => backend,
            (None, Some(address)) => Arc::new(RedisBackend::new(&address)?),
            (None, None) => Arc::new(MemoryBackend::new()),
        };
        let fetcher = Fetcher::new(
            BackoffPolicy::new(self.base_delay),
            self.max_retries,
            self.per_attempt_timeout,
        );
        Ok(FetchGateway::new(backend, fetcher, self.default_ttl))
    }
}

impl Default for MuninnBuilder {
    fn default() -> Self {
        Self::new()
    }
}
