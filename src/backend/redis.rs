//! Redis-backed remote KV cache.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio::sync::OnceCell;
use tracing::debug;

use super::CacheBackend;
use crate::{MuninnError, Result};

/// Thin client over a shared Redis instance.
///
/// Construction only parses the address; the connection is established
/// lazily, on the first `get`/`set`, and reused for the process lifetime
/// (the manager multiplexes concurrent commands over it). A failed
/// connection attempt is not retried within the failing call — it surfaces
/// to that caller as [`MuninnError::BackendUnavailable`]; the next call
/// attempts the connection again.
pub struct RedisBackend {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
}

impl RedisBackend {
    /// Create a backend for the given address (e.g. `redis://redis:6379`).
    ///
    /// Fails only on an unparseable address; reachability is not probed
    /// until first use.
    pub fn new(address: &str) -> Result<Self> {
        let client = redis::Client::open(address)
            .map_err(|e| MuninnError::Configuration(format!("invalid redis address: {e}")))?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        let manager = self
            .conn
            .get_or_try_init(|| async {
                debug!("establishing redis connection");
                ConnectionManager::new(self.client.clone()).await
            })
            .await
            .map_err(|e| MuninnError::BackendUnavailable(e.to_string()))?;
        Ok(manager.clone())
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| MuninnError::BackendUnavailable(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connection().await?;
        match ttl {
            // EX has whole-second granularity and rejects 0.
            Some(ttl) => {
                conn.set_ex::<_, _, ()>(key, value, ttl.as_secs().max(1))
                    .await
            }
            None => conn.set::<_, _, ()>(key, value).await,
        }
        .map_err(|e| MuninnError::BackendUnavailable(e.to_string()))
    }
}
