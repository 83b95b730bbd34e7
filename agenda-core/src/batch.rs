//! Batch update and delete over an event collection.

use std::collections::HashSet;

use crate::event::{Event, IdentifiedPatch};

/// Merge each patch shallowly onto the stored event sharing its id.
///
/// Patches apply in order onto the current state; ids with no stored
/// counterpart are skipped. Returns how many patches matched — callers
/// treat zero as a not-found failure for the whole batch, while partial
/// matches still apply.
pub fn batch_update(events: &mut [Event], patches: &[IdentifiedPatch]) -> usize {
    let mut matched = 0;

    for identified in patches {
        if let Some(event) = events.iter_mut().find(|e| e.id == identified.id) {
            identified.patch.apply_to(event);
            matched += 1;
        }
    }

    matched
}

/// Remove every event whose id is in the given set.
///
/// Idempotent: already-absent ids are silently ignored, so removing
/// zero, one or all ids is always a success.
pub fn batch_delete(events: Vec<Event>, ids: &HashSet<String>) -> Vec<Event> {
    events.into_iter().filter(|e| !ids.contains(&e.id)).collect()
}
