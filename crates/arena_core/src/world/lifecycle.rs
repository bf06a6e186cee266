//! Dense-array compaction
//!
//! Dead or consumed entities are removed from their dense array while
//! preserving two invariants: indices `[0, len)` are exactly the survivors,
//! and survivors keep their prior relative order.
//!
//! Removal is keyed by id in two passes rather than filtered in one, so that
//! a flagged entity is removed exactly once even when an earlier removal in
//! the same batch already shifted its index. Callers holding raw indices
//! across a compaction get dangling positions — cross-frame references must
//! be ids, which stay valid or vanish cleanly.

use crate::world::ids::EntityId;
use log::debug;

/// Remove every entry matching `flagged` from a dense array.
///
/// Pass one collects the ids of all flagged entries. Pass two removes each
/// collected id, scanning from the back of the array and closing the gap by
/// shifting the followers down one slot. Returns the number of entries
/// removed.
pub fn compact<T>(
    entries: &mut Vec<T>,
    id_of: impl Fn(&T) -> EntityId,
    flagged: impl Fn(&T) -> bool,
) -> usize {
    let ids: Vec<EntityId> = entries
        .iter()
        .filter(|entry| flagged(entry))
        .map(&id_of)
        .collect();

    for id in &ids {
        if let Some(index) = entries.iter().rposition(|entry| id_of(entry) == *id) {
            // Vec::remove shifts every following element down, which keeps
            // survivor order intact.
            entries.remove(index);
        }
    }

    if !ids.is_empty() {
        debug!("compacted {} entries, {} remain", ids.len(), entries.len());
    }
    ids.len()
}
