//! Calendar event types and their wire representation.
//!
//! Events are stored and served as camelCase JSON. Dates are `YYYY-MM-DD`,
//! times are same-day wall-clock `HH:MM` strings with no timezone attached,
//! so they get a custom serde codec instead of chrono's default text form.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, AgendaResult};

/// A single calendar entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique across the whole store.
    pub id: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub description: String,
    pub location: String,
    pub category: String,
    pub repeat: RepeatSpec,
    /// Minutes before `start_time` to raise an alert.
    pub notification_time: i64,
}

impl Event {
    /// Wall-clock start of the event as a naive datetime.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time)
    }
}

/// Recurrence specification attached to every event.
///
/// `id` links the events of one batch-created series together; it is only
/// ever set by [`crate::recurrence::expand_batch`] and absent everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatSpec {
    #[serde(rename = "type")]
    pub kind: RepeatType,
    /// Step between occurrences (every N days/weeks/...).
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Shared repeat-group identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl RepeatSpec {
    /// A non-repeating spec, the default for plain events.
    pub fn none() -> Self {
        RepeatSpec {
            kind: RepeatType::None,
            interval: 1,
            end_date: None,
            id: None,
        }
    }

    pub fn is_repeating(&self) -> bool {
        self.kind != RepeatType::None
    }
}

/// The closed set of supported repeat kinds.
///
/// Serialized as the lowercase wire spelling. Unknown spellings fail
/// deserialization with [`AgendaError::InvalidRepeatType`] instead of
/// falling back to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatType {
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RepeatType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatType::None => "none",
            RepeatType::Daily => "daily",
            RepeatType::Weekly => "weekly",
            RepeatType::Monthly => "monthly",
            RepeatType::Yearly => "yearly",
        }
    }
}

impl fmt::Display for RepeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepeatType {
    type Err = AgendaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(RepeatType::None),
            "daily" => Ok(RepeatType::Daily),
            "weekly" => Ok(RepeatType::Weekly),
            "monthly" => Ok(RepeatType::Monthly),
            "yearly" => Ok(RepeatType::Yearly),
            other => Err(AgendaError::InvalidRepeatType(other.to_string())),
        }
    }
}

impl Serialize for RepeatType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RepeatType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// An event as submitted for creation: everything but the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub description: String,
    pub location: String,
    pub category: String,
    pub repeat: RepeatSpec,
    pub notification_time: i64,
}

impl EventDraft {
    /// Check the data-model invariants that creation must uphold.
    pub fn validate(&self) -> AgendaResult<()> {
        if self.start_time >= self.end_time {
            return Err(AgendaError::InvalidEvent(format!(
                "startTime {} must be earlier than endTime {}",
                self.start_time.format("%H:%M"),
                self.end_time.format("%H:%M"),
            )));
        }
        if self.repeat.interval == 0 {
            return Err(AgendaError::InvalidEvent(
                "repeat interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Turn the draft into a stored event under the given id.
    pub fn into_event(self, id: String) -> Event {
        Event {
            id,
            title: self.title,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description,
            location: self.location,
            category: self.category,
            repeat: self.repeat,
            notification_time: self.notification_time,
        }
    }
}

/// A partial event update. Present fields replace the stored value,
/// absent fields are left untouched; `repeat` is replaced as a whole.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "hhmm::option")]
    pub start_time: Option<NaiveTime>,
    #[serde(deserialize_with = "hhmm::option")]
    pub end_time: Option<NaiveTime>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub repeat: Option<RepeatSpec>,
    pub notification_time: Option<i64>,
}

impl EventPatch {
    /// Validate what can be validated without the stored event at hand:
    /// a patch that rewrites both times must keep them ordered.
    pub fn validate(&self) -> AgendaResult<()> {
        if let (Some(start), Some(end)) = (self.start_time, self.end_time)
            && start >= end
        {
            return Err(AgendaError::InvalidEvent(format!(
                "startTime {} must be earlier than endTime {}",
                start.format("%H:%M"),
                end.format("%H:%M"),
            )));
        }
        if let Some(repeat) = &self.repeat
            && repeat.interval == 0
        {
            return Err(AgendaError::InvalidEvent(
                "repeat interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Shallow-merge the patch onto an existing event. The id is preserved.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.clone();
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(start_time) = self.start_time {
            event.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            event.end_time = end_time;
        }
        if let Some(description) = &self.description {
            event.description = description.clone();
        }
        if let Some(location) = &self.location {
            event.location = location.clone();
        }
        if let Some(category) = &self.category {
            event.category = category.clone();
        }
        if let Some(repeat) = &self.repeat {
            event.repeat = repeat.clone();
        }
        if let Some(notification_time) = self.notification_time {
            event.notification_time = notification_time;
        }
    }
}

/// A patch addressed at a specific stored event, as used by batch updates.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentifiedPatch {
    pub id: String,
    #[serde(flatten)]
    pub patch: EventPatch,
}

/// The persisted document shape: `{ "events": [...] }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventCollection {
    pub events: Vec<Event>,
}

impl EventCollection {
    /// Read and parse an event document from disk.
    pub fn load(path: &Path) -> AgendaResult<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Serde codec for `HH:MM` wall-clock times.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse(s: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(s, FORMAT)
            .map_err(|_| format!("Invalid time '{s}'. Expected HH:MM"))
    }

    /// Deserialize an optional `HH:MM` field (patches).
    pub fn option<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => parse(&s).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_event() -> Event {
        Event {
            id: "event-1".to_string(),
            title: "Team standup".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            description: "Daily sync".to_string(),
            location: "Room A".to_string(),
            category: "work".to_string(),
            repeat: RepeatSpec::none(),
            notification_time: 10,
        }
    }

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_value(make_test_event()).unwrap();
        assert_eq!(json["date"], "2024-07-01");
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "10:00");
        assert_eq!(json["notificationTime"], 10);
        assert_eq!(json["repeat"]["type"], "none");
        // No group id on a plain event
        assert!(json["repeat"].get("id").is_none());
    }

    #[test]
    fn test_event_parses_stored_document_shape() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "id": "2b7545a6-ebee-47dc-b1f6-d24ba02dcfc8",
            "title": "팀 회의",
            "date": "2024-07-22",
            "startTime": "10:00",
            "endTime": "11:00",
            "description": "주간 팀 미팅",
            "location": "회의실 A",
            "category": "업무",
            "repeat": { "type": "weekly", "interval": 1, "endDate": "2024-08-12" },
            "notificationTime": 1
        }))
        .unwrap();

        assert_eq!(event.start_time, NaiveTime::from_hms_opt(10, 0, 0).unwrap());
        assert_eq!(event.repeat.kind, RepeatType::Weekly);
        assert_eq!(
            event.repeat.end_date,
            Some(NaiveDate::from_ymd_opt(2024, 8, 12).unwrap())
        );
        assert_eq!(event.repeat.id, None);
    }

    #[test]
    fn test_invalid_repeat_type_is_rejected() {
        let err = "fortnightly".parse::<RepeatType>().unwrap_err();
        assert!(matches!(err, AgendaError::InvalidRepeatType(ref s) if s == "fortnightly"));

        let result: Result<RepeatSpec, _> =
            serde_json::from_str(r#"{"type": "fortnightly", "interval": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_time_is_rejected() {
        let result: Result<Event, _> = serde_json::from_value(serde_json::json!({
            "id": "x",
            "title": "x",
            "date": "2024-07-01",
            "startTime": "9am",
            "endTime": "10:00",
            "description": "",
            "location": "",
            "category": "",
            "repeat": { "type": "none", "interval": 1 },
            "notificationTime": 0
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_validation() {
        let draft: EventDraft = serde_json::from_value(serde_json::json!({
            "title": "Backwards",
            "date": "2024-07-01",
            "startTime": "11:00",
            "endTime": "10:00",
            "description": "",
            "location": "",
            "category": "",
            "repeat": { "type": "none", "interval": 1 },
            "notificationTime": 0
        }))
        .unwrap();
        assert!(matches!(draft.validate(), Err(AgendaError::InvalidEvent(_))));
    }

    #[test]
    fn test_patch_merges_shallowly() {
        let mut event = make_test_event();
        let patch: EventPatch = serde_json::from_value(serde_json::json!({
            "title": "Renamed",
            "endTime": "10:30",
            "repeat": { "type": "daily", "interval": 2 }
        }))
        .unwrap();

        patch.apply_to(&mut event);

        assert_eq!(event.id, "event-1");
        assert_eq!(event.title, "Renamed");
        assert_eq!(event.end_time, NaiveTime::from_hms_opt(10, 30, 0).unwrap());
        assert_eq!(event.repeat.kind, RepeatType::Daily);
        assert_eq!(event.repeat.interval, 2);
        // Untouched fields survive
        assert_eq!(event.location, "Room A");
        assert_eq!(event.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }
}
