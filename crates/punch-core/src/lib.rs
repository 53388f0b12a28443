//! Core domain logic for punch.
//!
//! This crate contains the fundamental types and logic for:
//! - Tasks and events: what time is recorded against, and the intervals themselves
//! - Weekly summaries: bucketing events into per-task, per-weekday durations
//! - Aggregation: row, column and grand totals over a week of summaries

mod aggregation;
pub mod event;
pub mod summary;
pub mod task;
pub mod types;

pub use aggregation::{Highlight, RowTotal, TrackingContext, WeekTotals};
pub use event::{Event, EventIdList, EventList, EventMap, dump_events};
pub use summary::{DAYS_PER_WEEK, WeeklySummary, summarize_week, week_start_for};
pub use task::{Task, TaskList};
pub use types::{EventId, InstallationId, TaskId, ValidationError};
