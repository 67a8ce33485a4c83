//! Cache backend contract and the in-process implementation.
//!
//! The accessor never talks to a cache service directly; it goes through
//! [`CacheBackend`] so the service (in-process map, Redis, ...) stays an
//! external collaborator. Implementations own their synchronization; each
//! key's replace must be atomic so concurrent loads can race without mixing
//! bytes, but unrelated keys must not contend on one lock.

use crate::error::{CacheError, CacheResult};
use dashmap::DashMap;
use std::time::{Duration, Instant};

/// A cached value plus the moment it was written.
///
/// The insertion time travels with the value so the accessor can apply its
/// own freshness bound on read, independent of backend-side expiry.
#[derive(Clone, Debug)]
pub struct CachedValue {
    pub bytes: Vec<u8>,
    pub inserted_at: Instant,
}

impl CachedValue {
    /// Wraps serialized bytes with the current timestamp.
    #[must_use]
    pub fn now(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            inserted_at: Instant::now(),
        }
    }

    /// Age of this entry relative to `now`.
    #[must_use]
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.inserted_at)
    }
}

/// Key-value operations against the external cache service.
pub trait CacheBackend: Send + Sync {
    /// Fetches the entry for `key`, if any.
    fn get(&self, key: &str) -> CacheResult<Option<CachedValue>>;

    /// Stores `value` under `key`. `ttl` is a hint for backends with native
    /// expiry; the accessor enforces its own freshness bound regardless.
    /// The slot is replaced atomically: last write wins.
    fn set(&self, key: &str, value: CachedValue, ttl: Duration) -> CacheResult<()>;

    /// Removes the entry for `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> CacheResult<()>;
}

/// In-process cache backend over a concurrent map.
///
/// Expired entries are dropped lazily when the same key is read again;
/// there is no sweeper.
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, (CachedValue, Duration)>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries, counting not-yet-reclaimed expired ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CacheBackend for MemoryCache {
    fn get(&self, key: &str) -> CacheResult<Option<CachedValue>> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            let (value, ttl) = entry.value();
            if value.age(now) <= *ttl {
                return Ok(Some(value.clone()));
            }
        } else {
            return Ok(None);
        }
        // Expired: reclaim under the entry lock, re-checking in case a
        // concurrent set replaced it between our read and the removal.
        self.entries
            .remove_if(key, |_, (value, ttl)| value.age(now) > *ttl);
        Ok(None)
    }

    fn set(&self, key: &str, value: CachedValue, ttl: Duration) -> CacheResult<()> {
        self.entries.insert(key.to_string(), (value, ttl));
        Ok(())
    }

    fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Backend double that fails every call, for exercising degradation paths.
pub struct UnreachableCache;

impl CacheBackend for UnreachableCache {
    fn get(&self, _key: &str) -> CacheResult<Option<CachedValue>> {
        Err(CacheError::Backend("cache service unreachable".to_string()))
    }

    fn set(&self, _key: &str, _value: CachedValue, _ttl: Duration) -> CacheResult<()> {
        Err(CacheError::Backend("cache service unreachable".to_string()))
    }

    fn delete(&self, _key: &str) -> CacheResult<()> {
        Err(CacheError::Backend("cache service unreachable".to_string()))
    }
}
