//! Free-text and date-window filtering over event collections.

use chrono::NaiveDate;

use crate::event::Event;

/// Case-insensitive match of a search term against title, description
/// and location. An empty term matches everything.
pub fn matches_term(event: &Event, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    event.title.to_lowercase().contains(&term)
        || event.description.to_lowercase().contains(&term)
        || event.location.to_lowercase().contains(&term)
}

/// Whether an event falls inside the inclusive date window.
pub fn in_range(event: &Event, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    if let Some(from) = from
        && event.date < from
    {
        return false;
    }
    if let Some(to) = to
        && event.date > to
    {
        return false;
    }
    true
}

/// Events matching a search term, in store order.
pub fn filter_by_term<'a>(events: &'a [Event], term: &str) -> Vec<&'a Event> {
    events.iter().filter(|e| matches_term(e, term)).collect()
}

/// Events inside the inclusive date window, in store order.
pub fn filter_by_range<'a>(
    events: &'a [Event],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<&'a Event> {
    events.iter().filter(|e| in_range(e, from, to)).collect()
}
