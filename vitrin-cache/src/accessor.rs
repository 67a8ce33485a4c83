//! The cache-aside accessor.

use crate::backend::{CacheBackend, CachedValue};
use crate::error::CacheResult;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Keyed read-through cache over a [`CacheBackend`].
///
/// Two concurrent misses for the same key may both invoke their loaders;
/// the backend replaces the slot atomically, so the last completed load
/// wins and readers never see interleaved bytes. There is deliberately no
/// stampede lock; the underlying store is idempotent for reads.
#[derive(Clone)]
pub struct CacheAside {
    backend: Arc<dyn CacheBackend>,
}

impl CacheAside {
    #[must_use]
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    /// Returns the cached value for `key` if it is younger than `ttl`,
    /// otherwise runs `loader`, stores its result, and returns it.
    ///
    /// Loader failures propagate unchanged. Backend failures do not: the
    /// read degrades to loader-only with a logged warning, so a down cache
    /// service costs performance, never correctness.
    pub fn get_or_load<V, E, F>(&self, key: &str, ttl: Duration, loader: F) -> Result<V, E>
    where
        V: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<V, E>,
    {
        match self.backend.get(key) {
            Ok(Some(cached)) if cached.age(Instant::now()) <= ttl => {
                match serde_json::from_slice(&cached.bytes) {
                    Ok(value) => {
                        debug!(key, "cache hit");
                        return Ok(value);
                    }
                    Err(e) => {
                        // Stale schema or corrupt entry: treat as a miss and
                        // overwrite below rather than serving it.
                        warn!(key, error = %e, "cached value undeserializable, reloading");
                    }
                }
            }
            Ok(_) => debug!(key, "cache miss"),
            Err(e) => {
                warn!(key, error = %e, "cache backend unavailable, degrading to loader");
                return loader();
            }
        }

        let value = loader()?;
        match serde_json::to_vec(&value) {
            Ok(bytes) => {
                if let Err(e) = self.backend.set(key, CachedValue::now(bytes), ttl) {
                    warn!(key, error = %e, "cache write failed, serving uncached value");
                }
            }
            Err(e) => warn!(key, error = %e, "loaded value unserializable, not caching"),
        }
        Ok(value)
    }

    /// Evicts `key`. Synchronous: once this returns Ok, the next
    /// `get_or_load` for `key` misses and reloads.
    ///
    /// Errors propagate so write paths can surface a broken pairing instead
    /// of silently serving stale content for up to a TTL.
    pub fn invalidate(&self, key: &str) -> CacheResult<()> {
        self.backend.delete(key)?;
        debug!(key, "cache invalidated");
        Ok(())
    }
}
