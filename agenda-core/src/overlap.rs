//! Overlap detection between calendar events.
//!
//! Times are same-day wall-clock values; two events intersect under
//! half-open interval semantics, so back-to-back events (one ending
//! exactly when the next starts) do not count as overlapping.

use crate::event::Event;

/// Whether two events on the same date have intersecting time ranges.
pub fn overlaps(a: &Event, b: &Event) -> bool {
    a.date == b.date && a.start_time < b.end_time && b.start_time < a.end_time
}

/// All existing events whose time range intersects the candidate's.
///
/// Results keep store order. The candidate's own id is excluded so that
/// editing an event never reports the event as overlapping itself; for a
/// not-yet-saved candidate, assign its fresh id before calling.
pub fn find_overlaps<'a>(candidate: &Event, existing: &'a [Event]) -> Vec<&'a Event> {
    existing
        .iter()
        .filter(|other| other.id != candidate.id && overlaps(candidate, other))
        .collect()
}
