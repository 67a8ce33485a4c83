//! Error types for the store layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store rejected or failed a query.
    #[error("store error: {0}")]
    Store(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A mutation succeeded but its paired cache invalidation did not.
    /// Readers may see stale content for up to a TTL.
    #[error("cache invalidation failed after write: {0}")]
    Invalidation(#[from] vitrin_cache::CacheError),
}
