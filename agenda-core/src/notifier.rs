//! Upcoming-event notification state machine.
//!
//! Tracks which events have already been alerted in the current session.
//! The notified set lives in memory only and is not persisted, so every
//! process start begins with a clean slate.

use std::collections::HashSet;

use chrono::{Duration, NaiveDateTime};

use crate::event::Event;

/// An alert to raise for one upcoming event.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub event_id: String,
    pub title: String,
    pub message: String,
}

/// Decides which events are due for an alert on each periodic tick.
#[derive(Debug, Default)]
pub struct Notifier {
    notified: HashSet<String>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate all events against the current wall-clock time.
    ///
    /// An event is due when it starts within its configured lead time
    /// (`0 <= minutes until start <= notification_time`) and has not been
    /// alerted before. Due events enter the notified set immediately, so
    /// re-evaluating them on a later tick never fires twice.
    pub fn tick(&mut self, events: &[Event], now: NaiveDateTime) -> Vec<Notification> {
        let mut due = Vec::new();

        for event in events {
            if self.notified.contains(&event.id) {
                continue;
            }

            let until = event.starts_at().signed_duration_since(now);
            if until < Duration::zero() {
                continue;
            }

            let minutes = until.num_minutes();
            if minutes <= event.notification_time {
                self.notified.insert(event.id.clone());
                due.push(Notification {
                    event_id: event.id.clone(),
                    title: event.title.clone(),
                    message: format!("{} starts in {} min", event.title, minutes),
                });
            }
        }

        due
    }

    /// Whether an alert has already been raised for this event id.
    pub fn was_notified(&self, event_id: &str) -> bool {
        self.notified.contains(event_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::RepeatSpec;
    use chrono::{NaiveDate, NaiveTime};

    fn event_at(id: &str, start: &str, lead_minutes: i64) -> Event {
        let start_time = NaiveTime::parse_from_str(start, "%H:%M").unwrap();
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            start_time,
            end_time: start_time + Duration::hours(1),
            description: String::new(),
            location: String::new(),
            category: String::new(),
            repeat: RepeatSpec::none(),
            notification_time: lead_minutes,
        }
    }

    fn at(time: &str) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .and_time(NaiveTime::parse_from_str(time, "%H:%M").unwrap())
    }

    #[test]
    fn test_event_inside_lead_window_fires() {
        let mut notifier = Notifier::new();
        let events = [event_at("a", "10:00", 10)];

        let due = notifier.tick(&events, at("09:55"));

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].event_id, "a");
        assert_eq!(due[0].message, "Event a starts in 5 min");
        assert!(notifier.was_notified("a"));
    }

    #[test]
    fn test_event_outside_lead_window_waits() {
        let mut notifier = Notifier::new();
        let events = [event_at("a", "10:00", 10)];

        assert!(notifier.tick(&events, at("09:30")).is_empty());
        assert!(!notifier.was_notified("a"));
    }

    #[test]
    fn test_event_already_started_never_fires() {
        let mut notifier = Notifier::new();
        let events = [event_at("a", "10:00", 10)];

        assert!(notifier.tick(&events, at("10:01")).is_empty());
    }

    #[test]
    fn test_fires_exactly_at_start() {
        let mut notifier = Notifier::new();
        let events = [event_at("a", "10:00", 10)];

        assert_eq!(notifier.tick(&events, at("10:00")).len(), 1);
    }

    #[test]
    fn test_never_renotifies() {
        let mut notifier = Notifier::new();
        let events = [event_at("a", "10:00", 10)];

        assert_eq!(notifier.tick(&events, at("09:55")).len(), 1);
        // Same event re-evaluated on the next ticks
        assert!(notifier.tick(&events, at("09:56")).is_empty());
        assert!(notifier.tick(&events, at("09:58")).is_empty());
    }

    #[test]
    fn test_each_event_tracked_independently() {
        let mut notifier = Notifier::new();
        let events = [event_at("a", "10:00", 10), event_at("b", "10:30", 10)];

        let first = notifier.tick(&events, at("09:55"));
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].event_id, "a");

        let second = notifier.tick(&events, at("10:25"));
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].event_id, "b");
    }
}
