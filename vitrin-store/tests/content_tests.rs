//! Integration tests for the invalidate-on-write content accessor.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use vitrin_cache::{CacheAside, MemoryCache, UnreachableCache};
use vitrin_store::{ContentAccessor, DocumentStore, MemoryStore};

fn accessor(store: Arc<MemoryStore>) -> ContentAccessor {
    ContentAccessor::new(store, CacheAside::new(Arc::new(MemoryCache::new())))
}

#[test]
fn get_reads_through_and_caches() {
    let store = Arc::new(MemoryStore::new());
    store
        .put_document("site_settings", "main", json!({"title": "BestWork"}))
        .unwrap();
    let content = accessor(store.clone());

    let first = content.get("site_settings", "main").unwrap();
    assert_eq!(first, Some(json!({"title": "BestWork"})));

    // Mutate the store behind the accessor's back: the cached value is
    // served until an invalidation, which is exactly the contract.
    store
        .put_document("site_settings", "main", json!({"title": "changed"}))
        .unwrap();
    let second = content.get("site_settings", "main").unwrap();
    assert_eq!(second, Some(json!({"title": "BestWork"})));
}

#[test]
fn update_invalidates_so_next_read_reloads() {
    let store = Arc::new(MemoryStore::new());
    store
        .put_document("site_settings", "main", json!({"title": "old"}))
        .unwrap();
    let content = accessor(store);

    // Warm the cache, then write through the accessor.
    assert_eq!(
        content.get("site_settings", "main").unwrap(),
        Some(json!({"title": "old"}))
    );
    content
        .update("site_settings", "main", json!({"title": "new"}))
        .unwrap();

    assert_eq!(
        content.get("site_settings", "main").unwrap(),
        Some(json!({"title": "new"}))
    );
}

#[test]
fn collections_do_not_share_cache_slots() {
    let store = Arc::new(MemoryStore::new());
    let content = accessor(store);

    content
        .update("site_settings", "main", json!({"k": "settings"}))
        .unwrap();
    content
        .update("announcements", "main", json!({"k": "announcement"}))
        .unwrap();

    assert_eq!(
        content.get("site_settings", "main").unwrap(),
        Some(json!({"k": "settings"}))
    );
    assert_eq!(
        content.get("announcements", "main").unwrap(),
        Some(json!({"k": "announcement"}))
    );
}

#[test]
fn absent_document_reads_as_none() {
    let store = Arc::new(MemoryStore::new());
    let content = accessor(store);
    assert_eq!(content.get("site_settings", "missing").unwrap(), None);
}

#[test]
fn null_valued_document_stays_present_through_the_cache() {
    let store = Arc::new(MemoryStore::new());
    store
        .put_document("site_settings", "cleared", serde_json::Value::Null)
        .unwrap();
    let content = accessor(store);

    // A stored null is a present document, not an absence, and the
    // distinction must survive the cache round-trip.
    assert_eq!(
        content.get("site_settings", "cleared").unwrap(),
        Some(serde_json::Value::Null)
    );
    assert_eq!(
        content.get("site_settings", "cleared").unwrap(),
        Some(serde_json::Value::Null)
    );
}

#[test]
fn unreachable_cache_still_serves_fresh_reads() {
    let store = Arc::new(MemoryStore::new());
    store
        .put_document("site_settings", "main", json!({"title": "live"}))
        .unwrap();
    let content = ContentAccessor::new(store.clone(), CacheAside::new(Arc::new(UnreachableCache)));

    // Reads degrade to the store and stay correct.
    assert_eq!(
        content.get("site_settings", "main").unwrap(),
        Some(json!({"title": "live"}))
    );
    store
        .put_document("site_settings", "main", json!({"title": "newer"}))
        .unwrap();
    assert_eq!(
        content.get("site_settings", "main").unwrap(),
        Some(json!({"title": "newer"}))
    );
}

#[test]
fn unreachable_cache_fails_the_write_pairing() {
    let store = Arc::new(MemoryStore::new());
    let content = ContentAccessor::new(store, CacheAside::new(Arc::new(UnreachableCache)));

    // The mutation cannot be paired with its invalidation, so the write
    // path surfaces the broken consistency instead of hiding it.
    assert!(
        content
            .update("site_settings", "main", json!({"title": "x"}))
            .is_err()
    );
}
