//! Cache backend abstraction and built-in implementations.

use crate::error::Result;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "redis")]
mod redis;

#[cfg(feature = "redis")]
pub use self::redis::{RedisBackend, RedisConfig};

/// Single-key cache backend interface.
///
/// Backends are look-aside stores: `get`/`set`/`delete` are atomic at the
/// key level, but no cross-key ordering is guaranteed. Eviction by age and
/// memory bounds are the backend's concern, configured out of band.
///
/// All connectivity failures surface as `Error::CacheUnavailable`.
pub trait CacheBackend: Send + Sync {
    /// Fetch the raw bytes at `key`, or `None` on miss.
    fn get(&self, key: &str) -> impl std::future::Future<Output = Result<Option<Vec<u8>>>> + Send;

    /// Store raw bytes under `key`, with an optional time-to-live.
    fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Evict the entry at `key`. Deleting an absent key is not an error.
    fn delete(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Check whether `key` is present.
    fn exists(&self, key: &str) -> impl std::future::Future<Output = Result<bool>> + Send;

    /// Probe backend connectivity.
    fn health_check(&self) -> impl std::future::Future<Output = Result<bool>> + Send;
}

/// Process-local backend backed by a concurrent hash map.
///
/// TTL is enforced lazily: expired entries are dropped on the read path.
/// Suitable for tests and single-node deployments.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    entries: Arc<DashMap<String, StoredEntry>>,
}

#[derive(Clone)]
struct StoredEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl StoredEntry {
    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }
}

impl InMemoryBackend {
    pub fn new() -> Self {
        InMemoryBackend {
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Number of live (non-expired) entries.
    pub async fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.value().is_expired()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop every entry. Test helper.
    pub async fn clear_all(&self) {
        self.entries.clear();
    }
}

impl CacheBackend for InMemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                drop(entry);
                self.entries.remove(key);
                debug!("InMemory GET {} -> EXPIRED", key);
                return Ok(None);
            }
            debug!("InMemory GET {} -> HIT", key);
            return Ok(Some(entry.value.clone()));
        }
        debug!("InMemory GET {} -> MISS", key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) -> Result<()> {
        let expires_at = ttl.map(|d| Instant::now() + d);
        self.entries.insert(
            key.to_string(),
            StoredEntry { value, expires_at },
        );
        debug!("InMemory SET {} (ttl: {:?})", key, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        debug!("InMemory DELETE {}", key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}
