//! The document store contract and the in-memory implementation.

use crate::error::{StoreError, StoreResult};
use dashmap::DashMap;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use vitrin_types::{ItemDetail, ItemId};

/// The store's contract as the core sees it: one batched item query plus
/// single-document reads and writes. The store's own durability and query
/// engine are not specified here.
pub trait DocumentStore: Send + Sync {
    /// Fetches details for the given item ids in one batched query.
    ///
    /// Ids with no matching item are simply absent from the result; the
    /// call succeeds or fails as a whole, never partially.
    fn fetch_items(&self, ids: &[ItemId]) -> StoreResult<Vec<ItemDetail>>;

    /// Fetches a single document by collection and key.
    fn fetch_document(&self, collection: &str, key: &str) -> StoreResult<Option<Value>>;

    /// Writes a single document, replacing any previous value.
    fn put_document(&self, collection: &str, key: &str, value: Value) -> StoreResult<()>;
}

/// In-memory store for tests and embedded use.
///
/// Counts batched queries so tests can assert the aggregator's
/// one-query-per-resolve behavior.
#[derive(Default)]
pub struct MemoryStore {
    items: DashMap<ItemId, ItemDetail>,
    documents: DashMap<(String, String), Value>,
    batch_queries: AtomicUsize,
    fail_queries: std::sync::atomic::AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a catalog item.
    pub fn insert_item(&self, item: ItemDetail) {
        self.items.insert(item.id, item);
    }

    /// Number of batched item queries issued so far.
    #[must_use]
    pub fn batch_query_count(&self) -> usize {
        self.batch_queries.load(Ordering::SeqCst)
    }

    /// Makes every subsequent query fail, simulating a store outage.
    pub fn set_failing(&self, failing: bool) {
        self.fail_queries.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.fail_queries.load(Ordering::SeqCst) {
            Err(StoreError::Store("store unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

impl DocumentStore for MemoryStore {
    fn fetch_items(&self, ids: &[ItemId]) -> StoreResult<Vec<ItemDetail>> {
        self.batch_queries.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(ids
            .iter()
            .filter_map(|id| self.items.get(id).map(|entry| entry.value().clone()))
            .collect())
    }

    fn fetch_document(&self, collection: &str, key: &str) -> StoreResult<Option<Value>> {
        self.check_available()?;
        Ok(self
            .documents
            .get(&(collection.to_string(), key.to_string()))
            .map(|entry| entry.value().clone()))
    }

    fn put_document(&self, collection: &str, key: &str, value: Value) -> StoreResult<()> {
        self.check_available()?;
        self.documents
            .insert((collection.to_string(), key.to_string()), value);
        Ok(())
    }
}
