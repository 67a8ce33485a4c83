//! Cart line types.
//!
//! A cart is an ordered sequence of [`LineReference`]s (item id + requested
//! quantity). The store layer resolves each reference into a [`ResolvedLine`]
//! carrying display data and pricing, or an explicit unavailable marker when
//! the referenced item no longer exists. Output order and cardinality always
//! match the input, so callers can report holes positionally.

use crate::ids::ItemId;
use serde::{Deserialize, Serialize};

/// A single cart entry as stored in the session: which item, how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineReference {
    pub item_id: ItemId,
    pub quantity: u32,
}

impl LineReference {
    #[must_use]
    pub const fn new(item_id: ItemId, quantity: u32) -> Self {
        Self { item_id, quantity }
    }
}

/// Display and pricing data for a catalog item, as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub id: ItemId,
    pub name: String,
    /// Unit price in the shop currency.
    pub unit_price: f64,
}

/// A cart line after resolution against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResolvedLine {
    /// The referenced item exists; carries its detail and the line total.
    Resolved {
        item: ItemDetail,
        quantity: u32,
        line_total: f64,
    },
    /// The referenced item is no longer in the catalog. The reference is
    /// kept in place rather than dropped so the caller can show the hole.
    Unavailable { item_id: ItemId, quantity: u32 },
}

impl ResolvedLine {
    /// The item id this line refers to, whether or not it resolved.
    #[must_use]
    pub fn item_id(&self) -> ItemId {
        match self {
            Self::Resolved { item, .. } => item.id,
            Self::Unavailable { item_id, .. } => *item_id,
        }
    }

    /// The requested quantity from the original reference.
    #[must_use]
    pub fn quantity(&self) -> u32 {
        match self {
            Self::Resolved { quantity, .. } | Self::Unavailable { quantity, .. } => *quantity,
        }
    }

    /// Whether the line resolved to a catalog item.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Sums the line totals of resolved lines, rounded to 2 decimal places.
/// Unavailable lines contribute nothing.
#[must_use]
pub fn cart_total(lines: &[ResolvedLine]) -> f64 {
    let total: f64 = lines
        .iter()
        .filter_map(|line| match line {
            ResolvedLine::Resolved { line_total, .. } => Some(line_total),
            ResolvedLine::Unavailable { .. } => None,
        })
        .sum();
    (total * 100.0).round() / 100.0
}
