//! Recurrence grouping for batch-created events.
//!
//! The caller supplies one draft per desired occurrence (date-series
//! generation happens on the client); the expansion here assigns every
//! draft a fresh unique id and tags repeating drafts of the same batch
//! with one shared repeat-group id.

use uuid::Uuid;

use crate::event::{Event, EventDraft};

/// Generate a fresh event (or repeat-group) identifier.
fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a single stored event from a draft.
///
/// The single-create path never assigns a repeat-group id, even for a
/// repeating draft: grouping only exists for batches.
pub fn expand_single(draft: EventDraft) -> Event {
    draft.into_event(new_id())
}

/// Expand a batch of drafts into stored events.
///
/// One repeat-group id is generated per batch. Every draft gets its own
/// fresh event id; drafts with a repeating spec share the group id in
/// `repeat.id`, non-repeating drafts carry none.
pub fn expand_batch(drafts: Vec<EventDraft>) -> Vec<Event> {
    let group_id = new_id();

    drafts
        .into_iter()
        .map(|draft| {
            let mut event = draft.into_event(new_id());
            event.repeat.id = if event.repeat.is_repeating() {
                Some(group_id.clone())
            } else {
                None
            };
            event
        })
        .collect()
}
