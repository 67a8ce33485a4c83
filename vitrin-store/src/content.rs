//! Cached access to editable site content.
//!
//! Derived read-mostly documents (site settings, editable text blocks) are
//! read through the cache and mutated through [`ContentAccessor::update`],
//! which performs the store write and the cache invalidation as one call.
//! Routing all content writes through here is what upholds the cache's
//! consistency contract; the cache cannot detect store mutations itself.

use crate::error::StoreResult;
use crate::store::DocumentStore;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use vitrin_cache::CacheAside;

/// Default freshness bound for cached content.
pub const DEFAULT_CONTENT_TTL: Duration = Duration::from_secs(300);

/// Cached form of a lookup result. A bare `Option<Value>` would collapse
/// `Some(Value::Null)` and `None` into the same serialized `null`, so the
/// slot carries presence as an explicit tag.
#[derive(serde::Serialize, serde::Deserialize)]
enum DocumentSlot {
    Present(Value),
    Absent,
}

/// Read/write access to single-document content, cache-aside on reads and
/// invalidate-on-write on mutations.
#[derive(Clone)]
pub struct ContentAccessor {
    store: Arc<dyn DocumentStore>,
    cache: CacheAside,
    ttl: Duration,
}

impl ContentAccessor {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, cache: CacheAside) -> Self {
        Self {
            store,
            cache,
            ttl: DEFAULT_CONTENT_TTL,
        }
    }

    /// Overrides the freshness bound.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Reads a content document through the cache. `None` is cacheable too:
    /// an absent document does not hammer the store on every request.
    pub fn get(&self, collection: &str, key: &str) -> StoreResult<Option<Value>> {
        let cache_key = Self::cache_key(collection, key);
        let slot = self.cache.get_or_load(&cache_key, self.ttl, || -> StoreResult<DocumentSlot> {
            Ok(match self.store.fetch_document(collection, key)? {
                Some(value) => DocumentSlot::Present(value),
                None => DocumentSlot::Absent,
            })
        })?;
        Ok(match slot {
            DocumentSlot::Present(value) => Some(value),
            DocumentSlot::Absent => None,
        })
    }

    /// Writes a content document and evicts its cache entry in the same
    /// logical step. A failed invalidation is an error, not a log line:
    /// the mutation is durable but readers would see stale content.
    pub fn update(&self, collection: &str, key: &str, value: Value) -> StoreResult<()> {
        self.store.put_document(collection, key, value)?;
        self.cache.invalidate(&Self::cache_key(collection, key))?;
        debug!(collection, key, "content updated and cache entry evicted");
        Ok(())
    }

    fn cache_key(collection: &str, key: &str) -> String {
        format!("{collection}:{key}")
    }
}
