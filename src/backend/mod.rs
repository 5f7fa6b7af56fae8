//! Cache backend abstraction.
//!
//! Two implementations of [`CacheBackend`]:
//!
//! - [`RedisBackend`] — thin client over a shared Redis instance. The
//!   connection is established lazily on first use and reused for the
//!   process lifetime; an unreachable server surfaces as
//!   [`MuninnError::BackendUnavailable`](crate::MuninnError::BackendUnavailable).
//!
//! - [`MemoryBackend`] — in-process TTL map guarded by a single mutex,
//!   with passive expiry at read time. Used when no remote address is
//!   configured.
//!
//! Which backend a gateway uses is decided exactly once, when the gateway is
//! built (see [`MuninnBuilder`](crate::MuninnBuilder)): a configured remote
//! address selects Redis, otherwise the in-process map. The choice is fixed
//! for the gateway's lifetime — there is no call-time failover from a failed
//! remote backend to local caching; a remote failure propagates to the
//! caller instead of silently degrading.

pub mod memory;
pub mod redis;

pub use self::memory::MemoryBackend;
pub use self::redis::RedisBackend;

use std::time::Duration;

use async_trait::async_trait;

use crate::Result;

/// Storage interface the gateway caches through.
///
/// Values are opaque serialized payloads (the gateway stores JSON text).
/// Implementations must tolerate concurrent use; all gateway calls share one
/// backend handle.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Look up a value.
    ///
    /// A missing (or expired) key is `Ok(None)`, never an error. Only an
    /// unreachable backend errors, with `BackendUnavailable`.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value.
    ///
    /// With `ttl` the entry becomes logically absent once the duration
    /// elapses; without it the entry never expires on its own.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()>;
}
