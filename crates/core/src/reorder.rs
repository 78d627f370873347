//! Position assignment for drag-and-drop ordered lists.
//!
//! Ordered collections (hero slides, partners, team members, company
//! sections) store an integer `position`. A reorder request carries the full
//! list of ids in their new order; it must be a permutation of the ids
//! currently stored, and the result is always contiguous from zero.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// A single `(id, position)` assignment to persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionUpdate {
    pub id: DbId,
    pub position: i32,
}

/// Validate `requested` against `current` and assign zero-based positions.
///
/// Rejects duplicates, unknown ids and missing ids. The order of `current`
/// is irrelevant; only set equality is checked.
pub fn assign_positions(
    current: &[DbId],
    requested: &[DbId],
) -> Result<Vec<PositionUpdate>, CoreError> {
    let current_set: HashSet<DbId> = current.iter().copied().collect();
    let mut seen: HashSet<DbId> = HashSet::with_capacity(requested.len());

    for id in requested {
        if !seen.insert(*id) {
            return Err(CoreError::Validation(format!(
                "Duplicate id {id} in reorder request"
            )));
        }
        if !current_set.contains(id) {
            return Err(CoreError::Validation(format!(
                "Unknown id {id} in reorder request"
            )));
        }
    }

    if seen.len() != current_set.len() {
        let mut missing: Vec<DbId> = current_set.difference(&seen).copied().collect();
        missing.sort_unstable();
        return Err(CoreError::Validation(format!(
            "Reorder request is missing ids: {missing:?}"
        )));
    }

    requested
        .iter()
        .enumerate()
        .map(|(idx, id)| {
            let position = i32::try_from(idx)
                .map_err(|_| CoreError::Validation("Too many items to reorder".into()))?;
            Ok(PositionUpdate { id: *id, position })
        })
        .collect()
}

/// Move the item at `from` to index `to`, shifting the items in between.
///
/// This is the single drag gesture; the resulting order is what the client
/// sends back to the reorder endpoint.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), CoreError> {
    if from >= items.len() || to >= items.len() {
        return Err(CoreError::Validation(format!(
            "Move indices out of range: from {from}, to {to}, len {}",
            items.len()
        )));
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}
