//! Error types for the cache layer.

use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors that can occur in cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The cache service is unreachable or rejected the call.
    #[error("cache backend error: {0}")]
    Backend(String),

    /// A cached value failed to serialize/deserialize.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
