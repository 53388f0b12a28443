//! Tracking controller: owns the event list and reacts to idle notices.
//!
//! At most one event is in progress at a time. An idle notice closes it at
//! the moment input stopped, and nothing is reopened until the user asks.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use punch_core::{
    Event, EventId, EventList, InstallationId, Task, TaskId, TaskList, TrackingContext,
    WeekTotals, summarize_week, week_start_for,
};
use punch_idle::IdleNotice;

use crate::timesheet::Timesheet;

/// Owns the canonical event list for one installation.
#[derive(Debug, Default)]
pub struct TrackingController {
    installation_id: InstallationId,
    tasks: TaskList,
    events: EventList,
    /// Index into `events` of the in-progress event.
    active: Option<usize>,
    next_id: i32,
}

impl TrackingController {
    pub fn new(installation_id: InstallationId) -> Self {
        Self {
            installation_id,
            ..Self::default()
        }
    }

    /// Continues from an existing timesheet. Event IDs pick up after the
    /// highest one present.
    ///
    /// The in-progress event with the latest start becomes the active one.
    /// Any older event left open stays open but is not active.
    pub fn from_timesheet(installation_id: InstallationId, sheet: Timesheet) -> Self {
        let next_id = sheet
            .events
            .iter()
            .map(|e| e.id().value())
            .max()
            .map_or(0, |max| max.saturating_add(1));
        let active = sheet
            .events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_valid() && e.is_in_progress())
            .max_by_key(|(_, e)| e.start())
            .map(|(index, _)| index);
        Self {
            installation_id,
            tasks: sheet.tasks,
            events: sheet.events,
            active,
            next_id,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The in-progress event, if recording.
    pub fn active_event(&self) -> Option<&Event> {
        self.active.and_then(|i| self.events.get(i))
    }

    pub fn active_task(&self) -> Option<TaskId> {
        self.active_event().map(Event::task_id)
    }

    /// Starts recording against `task`, closing any event already running.
    pub fn start_task(&mut self, task: Task) -> &Event {
        self.start_task_at(task, Utc::now())
    }

    /// Starts recording against `task` at `at`.
    pub fn start_task_at(&mut self, task: Task, at: DateTime<Utc>) -> &Event {
        self.stop_at(at);

        let task_id = task.id;
        match self.tasks.iter_mut().find(|t| t.id == task_id) {
            Some(existing) => existing.name = task.name,
            None => self.tasks.push(task),
        }

        let mut event = Event::default();
        event.set_id(EventId::new(self.next_id).unwrap_or_default());
        event.set_installation_id(self.installation_id);
        event.set_task_id(task_id);
        event.set_start(at);
        self.next_id = self.next_id.saturating_add(1);

        tracing::info!(task = %task_id, event = %event.id(), "recording started");
        self.events.push(event);
        let index = self.events.len() - 1;
        self.active = Some(index);
        &self.events[index]
    }

    /// Stops recording now.
    pub fn stop(&mut self) -> Option<&Event> {
        self.stop_at(Utc::now())
    }

    /// Stops recording at `at`. The end is never placed before the start.
    pub fn stop_at(&mut self, at: DateTime<Utc>) -> Option<&Event> {
        let index = self.active.take()?;
        let event = self.events.get_mut(index)?;
        let end = event.start().map_or(at, |start| at.max(start));
        event.set_end(end);
        tracing::info!(
            task = %event.task_id(),
            event = %event.id(),
            duration_secs = event.duration(),
            "recording stopped"
        );
        Some(&*event)
    }

    /// Closes the in-progress event at the moment the user went idle.
    ///
    /// Time after `idle_since` is never recorded. No new event is opened.
    pub fn handle_idle(&mut self, notice: &IdleNotice) -> Option<&Event> {
        if self.active.is_none() {
            tracing::debug!("idle notice with nothing recording");
            return None;
        }
        tracing::info!(
            idle_secs = notice.idle_secs,
            since = %notice.idle_since,
            "closing event at start of idle period"
        );
        self.stop_at(notice.idle_since)
    }

    /// Sets the comment of event `id`.
    pub fn set_comment(&mut self, id: EventId, comment: impl Into<String>) -> bool {
        let Some(event) = self.events.iter_mut().find(|e| e.id() == id) else {
            return false;
        };
        event.set_comment(comment);
        true
    }

    /// Removes event `id`. Removing the in-progress event ends recording.
    pub fn remove_event(&mut self, id: EventId) -> Option<Event> {
        let index = self.events.iter().position(|e| e.id() == id)?;
        match self.active {
            Some(active) if active == index => self.active = None,
            Some(active) if active > index => self.active = Some(active - 1),
            _ => {}
        }
        Some(self.events.remove(index))
    }

    /// Tracking state for aggregation, with `today` as the current day.
    pub fn context(&self, today: NaiveDate) -> TrackingContext {
        TrackingContext {
            active_task: self.active_task(),
            today,
        }
    }

    /// Totals for the week containing `today`.
    pub fn week_totals<Tz: TimeZone>(&self, today: NaiveDate, tz: &Tz) -> WeekTotals {
        let context = self.context(today);
        let summaries = summarize_week(
            &self.events,
            &self.tasks,
            week_start_for(today),
            tz,
            &context,
        );
        WeekTotals::compute(&summaries, &context)
    }

    /// Snapshot of the tasks and events.
    pub fn timesheet(&self) -> Timesheet {
        Timesheet {
            tasks: self.tasks.clone(),
            events: self.events.clone(),
        }
    }
}
