//! Cache-aside accessor for vitrin.
//!
//! Read-mostly derived content (editable site text, settings) is served
//! through [`CacheAside`]: check the cache, fall back to the loader, store
//! the result. Write paths evict the corresponding key explicitly; the
//! cache has no way to observe store mutations on its own, so the
//! invalidate-on-write pairing is the whole consistency contract.
//!
//! The cache service itself is behind [`CacheBackend`]; [`MemoryCache`] is
//! the in-process implementation. A backend failure never fails a read:
//! `get_or_load` degrades to calling the loader and skips the write.

mod accessor;
mod backend;
mod error;

pub use accessor::CacheAside;
pub use backend::{CacheBackend, CachedValue, MemoryCache, UnreachableCache};
pub use error::{CacheError, CacheResult};
