//! In-process TTL map backend.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use super::CacheBackend;
use crate::Result;

/// A stored value with its expiry deadline.
///
/// `expires_at == None` means the entry never expires. An entry whose
/// deadline has passed is logically absent even while still physically
/// present; [`MemoryBackend::get`] sweeps it on the next read.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }
}

/// In-process TTL map guarded by a single mutex.
///
/// The lock covers the whole map and is held only for the duration of one
/// get or set — never across an upstream fetch or any other await point, so
/// unrelated concurrent fetches are not serialized through it.
///
/// Expiry is passive: there is no background sweeper. `get` checks the
/// deadline at read time and evicts the entry if it has passed. The map is
/// bounded only by the number of distinct keys callers use; there is no
/// eviction-by-size policy, so unboundedly many distinct keys grow the map
/// without limit. Known design limitation.
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Number of physically present entries, including not-yet-swept
    /// expired ones.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(key) {
            Some(entry) if entry.is_expired(now) => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let entry = CacheEntry {
            value: value.to_owned(),
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .insert(key.to_owned(), entry);
        Ok(())
    }
}
