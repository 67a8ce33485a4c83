//! Bulk resolution of cart lines.
//!
//! A cart of n references used to cost n store round-trips; this collects
//! the distinct item ids, issues one batched query, and merges the results
//! back onto the original ordered sequence. Missing items stay in place as
//! explicit unavailable lines so the caller can report the holes.

use crate::error::StoreResult;
use crate::store::DocumentStore;
use std::collections::{HashMap, HashSet};
use tracing::debug;
use vitrin_types::{ItemDetail, ItemId, LineReference, ResolvedLine};

/// Resolves an ordered sequence of line references against the catalog.
///
/// Issues exactly one batched query for the distinct ids (zero when `refs`
/// is empty). Output length and order always equal the input's; duplicate
/// references to the same id each keep their own quantity. On store failure
/// the whole call fails; partial results are never returned.
pub fn resolve_lines(
    store: &dyn DocumentStore,
    refs: &[LineReference],
) -> StoreResult<Vec<ResolvedLine>> {
    if refs.is_empty() {
        return Ok(Vec::new());
    }

    // Distinct ids in first-seen order, bounding the batched query size.
    let mut seen = HashSet::new();
    let distinct: Vec<ItemId> = refs
        .iter()
        .map(|r| r.item_id)
        .filter(|id| seen.insert(*id))
        .collect();

    let details: HashMap<ItemId, ItemDetail> = store
        .fetch_items(&distinct)?
        .into_iter()
        .map(|item| (item.id, item))
        .collect();
    debug!(
        references = refs.len(),
        distinct = distinct.len(),
        found = details.len(),
        "resolved cart lines from one batched query"
    );

    Ok(refs
        .iter()
        .map(|r| match details.get(&r.item_id) {
            Some(item) => ResolvedLine::Resolved {
                item: item.clone(),
                quantity: r.quantity,
                line_total: item.unit_price * f64::from(r.quantity),
            },
            None => ResolvedLine::Unavailable {
                item_id: r.item_id,
                quantity: r.quantity,
            },
        })
        .collect())
}
