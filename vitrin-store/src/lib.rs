//! Document store access for vitrin.
//!
//! The store itself (its durability, replication, query engine) is an
//! external collaborator behind the [`DocumentStore`] trait. This crate
//! owns how the application talks to it:
//!
//! - [`resolve_lines`] replaces per-item lookups with one batched query
//! - [`ContentAccessor`] couples every content mutation to its cache
//!   invalidation, so no call site can forget the pairing

mod aggregator;
mod content;
mod error;
mod store;

pub use aggregator::resolve_lines;
pub use content::{ContentAccessor, DEFAULT_CONTENT_TTL};
pub use error::{StoreError, StoreResult};
pub use store::{DocumentStore, MemoryStore};
