//! Core type definitions for the vitrin storefront engine.
//!
//! This crate defines the fundamental, route-agnostic types shared by the
//! data-access layers:
//! - Item identifiers (UUID v7)
//! - Cart line types (references in, resolved lines out)
//! - National-identifier checksum validation
//!
//! Route handlers, templates, and form schemas live outside the core and
//! must not leak types into here.

mod identity;
mod ids;
mod line;

pub use identity::validate_identifier;
pub use ids::ItemId;
pub use line::{ItemDetail, LineReference, ResolvedLine, cart_total};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
