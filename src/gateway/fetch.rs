//! Cache-aside orchestration.
//!
//! [`FetchGateway::get_or_fetch`] is the single entry point callers use:
//! try the cache, on miss run the retrying fetch, store the result, return
//! it. A cache hit never touches the upstream; a miss triggers exactly one
//! fetch attempt sequence (which retries internally).
//!
//! # No single-flight deduplication
//!
//! Concurrent `get_or_fetch` calls for the *same* key that both miss will
//! independently run the upstream fetch sequence and both write the cache —
//! last writer wins, no version check. There is no per-key mutex around the
//! miss path; redundant concurrent fetches are part of the contract, not a
//! bug. Both calls complete with a valid value and the cache ends up
//! holding one.
//!
//! # Failure propagation
//!
//! `BackendUnavailable` from the cache and `FetchExhausted` from the
//! upstream both propagate to the caller unmodified. The gateway performs
//! no recovery for either — in particular there is no call-time fallback
//! from a failed remote backend to local caching. Either a fully assembled
//! value is returned or a failure; never a partial result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::backend::CacheBackend;
use crate::error::{Result, TransportError};
use crate::fetcher::Fetcher;
use crate::telemetry;

/// Cache-aside fetch gateway.
///
/// Stateless apart from the shared backend handle; clones share the
/// backend, so one gateway serves any number of concurrent tasks.
///
/// ```rust,no_run
/// use muninn::{Muninn, TransportError};
///
/// # #[tokio::main]
/// # async fn main() -> muninn::Result<()> {
/// let gateway = Muninn::builder().build()?;
///
/// let summary: serde_json::Value = gateway
///     .get_or_fetch("coin:summary:bitcoin", None, || async {
///         Ok::<_, TransportError>(serde_json::json!({"price": 100}))
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FetchGateway {
    backend: Arc<dyn CacheBackend>,
    fetcher: Fetcher,
    default_ttl: Duration,
}

impl FetchGateway {
    /// Create a gateway over an explicitly constructed backend.
    ///
    /// Most callers go through [`Muninn::builder()`](crate::Muninn::builder),
    /// which performs configuration-driven backend selection; this
    /// constructor is the injection seam beneath it.
    pub fn new(backend: Arc<dyn CacheBackend>, fetcher: Fetcher, default_ttl: Duration) -> Self {
        Self {
            backend,
            fetcher,
            default_ttl,
        }
    }

    /// Return the cached value for `key`, fetching and storing it on miss.
    ///
    /// `ttl` bounds the freshness window of a newly stored value; `None`
    /// applies the gateway's configured default. `fetch_fn` is invoked only
    /// on a miss, and then under the fetcher's retry/timeout regime.
    ///
    /// A hit that fails to deserialize propagates as a JSON error rather
    /// than being treated as a miss.
    pub async fn get_or_fetch<T, F, Fut>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        fetch_fn: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Fut,
        Fut: Future<Output = std::result::Result<T, TransportError>>,
    {
        if let Some(raw) = self.backend.get(key).await? {
            metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
            debug!(key, "cache hit");
            return Ok(serde_json::from_str(&raw)?);
        }

        metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
        debug!(key, "cache miss, fetching upstream");

        let value = self.fetcher.call(fetch_fn).await?;

        let raw = serde_json::to_string(&value)?;
        let ttl = ttl.unwrap_or(self.default_ttl);
        self.backend.set(key, &raw, Some(ttl)).await?;
        debug!(key, ttl_secs = ttl.as_secs(), "cached fresh value");

        Ok(value)
    }
}
