//! Recorded time intervals.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EventId, InstallationId, TaskId};

/// A recorded interval of time spent on one task.
///
/// An event without an end timestamp is in progress. Its duration is always
/// derived from the two timestamps and never stored.
///
/// Setters do not reject inconsistent values (an end before the start, a
/// missing task); use [`Event::is_valid`] before billing or summarising.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    id: EventId,
    installation_id: InstallationId,
    task_id: TaskId,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<DateTime<Utc>>,
}

impl Event {
    /// Creates an in-progress event for `task_id`, started now.
    pub fn started(task_id: TaskId) -> Self {
        let mut event = Self {
            task_id,
            ..Self::default()
        };
        event.set_start_now();
        event
    }

    pub const fn id(&self) -> EventId {
        self.id
    }

    pub const fn set_id(&mut self, id: EventId) {
        self.id = id;
    }

    pub const fn installation_id(&self) -> InstallationId {
        self.installation_id
    }

    pub const fn set_installation_id(&mut self, installation_id: InstallationId) {
        self.installation_id = installation_id;
    }

    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub const fn set_task_id(&mut self, task_id: TaskId) {
        self.task_id = task_id;
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment = comment.into();
    }

    pub const fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub const fn set_start(&mut self, start: DateTime<Utc>) {
        self.start = Some(start);
    }

    /// Stamps the start with the current instant.
    pub fn set_start_now(&mut self) {
        self.set_start(Utc::now());
    }

    pub const fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub const fn set_end(&mut self, end: DateTime<Utc>) {
        self.end = Some(end);
    }

    /// Stamps the end with the current instant.
    pub fn set_end_now(&mut self) {
        self.set_end(Utc::now());
    }

    /// Whether the event has been started but not yet stopped.
    pub const fn is_in_progress(&self) -> bool {
        self.start.is_some() && self.end.is_none()
    }

    /// An event is valid once it references a task and has a start time.
    /// A closed event must also not end before it starts.
    pub fn is_valid(&self) -> bool {
        if !self.task_id.is_valid() {
            return false;
        }
        match (self.start, self.end) {
            (Some(start), Some(end)) => end >= start,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Returns the duration of this event in whole seconds.
    ///
    /// In-progress and invalid events report 0. Sub-second remainders are
    /// truncated.
    pub fn duration(&self) -> i64 {
        if !self.is_valid() {
            return 0;
        }
        match (self.start, self.end) {
            (Some(start), Some(end)) => (end - start).num_seconds(),
            _ => 0,
        }
    }

    /// Writes the event to the debug log.
    pub fn dump(&self) {
        tracing::debug!(
            id = %self.id,
            installation_id = %self.installation_id,
            task_id = %self.task_id,
            start = ?self.start,
            end = ?self.end,
            duration_secs = self.duration(),
            comment = %self.comment,
            "event"
        );
    }
}

/// A list of events.
pub type EventList = Vec<Event>;

/// A list of event IDs.
pub type EventIdList = Vec<EventId>;

/// Events keyed by ID.
pub type EventMap = BTreeMap<EventId, Event>;

/// Writes every event in `events` to the debug log.
pub fn dump_events(events: &[Event]) {
    tracing::debug!(count = events.len(), "event list");
    for event in events {
        event.dump();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ts(seconds: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 13, 9, 0, 0)
            .single()
            .expect("valid test timestamp")
            + Duration::seconds(seconds)
    }

    fn closed(start: i64, end: i64) -> Event {
        let mut event = Event::default();
        event.set_task_id(TaskId::new(1).unwrap());
        event.set_start(ts(start));
        event.set_end(ts(end));
        event
    }

    #[test]
    fn start_only_has_zero_duration() {
        let mut event = Event::default();
        event.set_task_id(TaskId::new(1).unwrap());
        event.set_start(ts(0));

        assert!(event.is_valid());
        assert!(event.is_in_progress());
        assert_eq!(event.duration(), 0);
    }

    #[test]
    fn closed_event_duration_in_seconds() {
        let event = closed(0, 3600);
        assert!(event.is_valid());
        assert_eq!(event.duration(), 3600);
        // Stable on recomputation.
        assert_eq!(event.duration(), 3600);
    }

    #[test]
    fn sub_second_remainder_truncates() {
        let mut event = closed(0, 0);
        event.set_end(ts(90) + Duration::milliseconds(999));
        assert_eq!(event.duration(), 90);
    }

    #[test]
    fn end_before_start_is_invalid() {
        let event = closed(100, 50);
        assert!(!event.is_valid());
        assert_eq!(event.duration(), 0);
    }

    #[test]
    fn missing_task_is_invalid() {
        let mut event = closed(0, 60);
        event.set_task_id(TaskId::NONE);
        assert!(!event.is_valid());
        assert_eq!(event.duration(), 0);
    }

    #[test]
    fn missing_start_is_invalid() {
        let mut event = Event::default();
        event.set_task_id(TaskId::new(1).unwrap());
        event.set_end(ts(60));
        assert!(!event.is_valid());
        assert_eq!(event.duration(), 0);
    }

    #[test]
    fn started_stamps_start() {
        let before = Utc::now();
        let event = Event::started(TaskId::new(3).unwrap());
        let after = Utc::now();

        let start = event.start().expect("start should be set");
        assert!(before <= start && start <= after);
        assert!(event.end().is_none());
    }

    #[test]
    fn equality_covers_every_field() {
        let a = closed(0, 60);
        let mut b = a.clone();
        assert_eq!(a, b);

        b.set_comment("meeting");
        assert_ne!(a, b);

        let mut c = a.clone();
        c.set_installation_id(InstallationId::new(2).unwrap());
        assert_ne!(a, c);

        let mut d = a.clone();
        d.set_id(EventId::new(9).unwrap());
        assert_ne!(a, d);
    }

    #[test]
    fn event_serde_roundtrip() {
        let mut event = closed(0, 1800);
        event.set_comment("review");

        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn event_deserializes_without_optional_fields() {
        let json = r#"{"id": 1, "installation_id": 1, "task_id": 4}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(event.start().is_none());
        assert!(event.comment().is_empty());
        assert!(!event.is_valid());
    }
}
