//! Per-task weekly summaries.
//!
//! A [`WeeklySummary`] holds one task's durations for the seven days of a
//! week, Monday first. [`summarize_week`] buckets an event list into one
//! summary per task.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Duration, NaiveDate, TimeZone};
use serde::Serialize;

use crate::TrackingContext;
use crate::event::Event;
use crate::task::Task;
use crate::types::TaskId;

/// Number of day slots in a summary.
pub const DAYS_PER_WEEK: usize = 7;

/// One task's recorded seconds per weekday.
///
/// `durations[0]` is Monday, `durations[6]` is Sunday. Days without
/// recorded time hold 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklySummary {
    pub task: TaskId,
    pub task_name: String,
    pub durations: [i64; DAYS_PER_WEEK],
}

impl WeeklySummary {
    /// Creates an all-zero summary for a task.
    pub fn new(task: TaskId, task_name: impl Into<String>) -> Self {
        Self {
            task,
            task_name: task_name.into(),
            durations: [0; DAYS_PER_WEEK],
        }
    }

    /// Sum of all seven days.
    pub fn total(&self) -> i64 {
        self.durations.iter().sum()
    }
}

/// Returns the Monday of the week containing `date`.
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Buckets `events` into one summary per task for the week starting at
/// `week_start`.
///
/// An event counts towards the day its start falls on in `tz`. Invalid
/// events are skipped. In-progress events contribute no time but still give
/// their task a row, as does the context's active task. Rows are ordered by
/// task ID; tasks missing from `tasks` are named after their ID.
pub fn summarize_week<Tz: TimeZone>(
    events: &[Event],
    tasks: &[Task],
    week_start: NaiveDate,
    tz: &Tz,
    context: &TrackingContext,
) -> Vec<WeeklySummary> {
    let names: HashMap<TaskId, &str> = tasks.iter().map(|t| (t.id, t.name.as_str())).collect();
    let week_end = week_start + Duration::days(7);

    let mut rows: BTreeMap<TaskId, [i64; DAYS_PER_WEEK]> = BTreeMap::new();

    for event in events {
        if !event.is_valid() {
            tracing::debug!(id = %event.id(), "skipping invalid event");
            continue;
        }
        let Some(start) = event.start() else {
            continue;
        };
        let day = start.with_timezone(tz).date_naive();
        if day >= week_end {
            continue;
        }
        let Ok(index) = usize::try_from((day - week_start).num_days()) else {
            continue;
        };
        rows.entry(event.task_id()).or_insert([0; DAYS_PER_WEEK])[index] += event.duration();
    }

    if let Some(active) = context.active_task {
        rows.entry(active).or_insert([0; DAYS_PER_WEEK]);
    }

    rows.into_iter()
        .map(|(task, durations)| {
            let task_name = names
                .get(&task)
                .map_or_else(|| format!("Task {task}"), |name| (*name).to_string());
            WeeklySummary {
                task,
                task_name,
                durations,
            }
        })
        .collect()
}
