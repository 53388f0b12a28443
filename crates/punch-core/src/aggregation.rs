//! Weekly totals over a set of summaries.
//!
//! [`WeekTotals::compute`] reduces per-task [`WeeklySummary`] rows into row
//! totals, day column totals and a grand total. The result owns all of its
//! data; the input slice may change freely afterwards.
//!
//! # Invariant
//!
//! The grand total equals both the sum of row totals and the sum of column
//! totals. A mismatch means the inputs were corrupted and trips a debug
//! assertion; [`WeekTotals::is_consistent`] exposes the same check.

use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

use crate::summary::{DAYS_PER_WEEK, WeeklySummary};
use crate::types::TaskId;

/// Tracking state owned by the controller and passed into aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingContext {
    /// The task currently being recorded, if any.
    pub active_task: Option<TaskId>,
    /// The calendar day treated as "today".
    pub today: NaiveDate,
}

impl Default for TrackingContext {
    fn default() -> Self {
        Self {
            active_task: None,
            today: Local::now().date_naive(),
        }
    }
}

impl TrackingContext {
    /// Weekday index of `today`, Monday = 0.
    pub fn today_index(&self) -> usize {
        self.today.weekday().num_days_from_monday() as usize
    }

    /// Whether `task` is the one being recorded.
    pub fn is_active(&self, task: TaskId) -> bool {
        self.active_task == Some(task)
    }
}

/// Computed total for one task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowTotal {
    pub task: TaskId,
    pub task_name: String,
    pub durations: [i64; DAYS_PER_WEEK],
    pub total: i64,
    pub active: bool,
}

/// Highlight weight for a single day cell.
///
/// Purely cosmetic: renderers may ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    None,
    Dim,
    Full,
}

/// Row, column and grand totals for one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekTotals {
    pub rows: Vec<RowTotal>,
    pub columns: [i64; DAYS_PER_WEEK],
    pub grand_total: i64,
    /// Weekday index of today, Monday = 0.
    pub today: usize,
}

impl WeekTotals {
    /// Computes totals for `summaries` under `context`.
    pub fn compute(summaries: &[WeeklySummary], context: &TrackingContext) -> Self {
        let rows: Vec<RowTotal> = summaries
            .iter()
            .map(|s| RowTotal {
                task: s.task,
                task_name: s.task_name.clone(),
                durations: s.durations,
                total: s.total(),
                active: context.is_active(s.task),
            })
            .collect();

        let mut columns = [0_i64; DAYS_PER_WEEK];
        for summary in summaries {
            for (column, duration) in columns.iter_mut().zip(summary.durations) {
                *column += duration;
            }
        }

        let grand_total = rows.iter().map(|r| r.total).sum();

        let totals = Self {
            rows,
            columns,
            grand_total,
            today: context.today_index(),
        };
        debug_assert!(
            totals.is_consistent(),
            "row totals, column totals and grand total disagree: {totals:?}"
        );
        tracing::debug!(
            rows = totals.rows.len(),
            grand_total = totals.grand_total,
            "computed week totals"
        );
        totals
    }

    /// Whether the row sums, column sums and grand total agree.
    pub fn is_consistent(&self) -> bool {
        let from_rows: i64 = self.rows.iter().map(|r| r.durations.iter().sum::<i64>()).sum();
        let from_columns: i64 = self.columns.iter().sum();
        let row_totals_match = self
            .rows
            .iter()
            .all(|r| r.total == r.durations.iter().sum::<i64>());
        row_totals_match && from_rows == from_columns && from_columns == self.grand_total
    }

    /// Whether there are no task rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(task, is_active)` for every row, in row order.
    pub fn activity(&self) -> Vec<(TaskId, bool)> {
        self.rows.iter().map(|r| (r.task, r.active)).collect()
    }

    /// The active row, if the active task has one.
    pub fn active_row(&self) -> Option<&RowTotal> {
        self.rows.iter().find(|r| r.active)
    }

    /// Highlight for the cell at `row`, `day`.
    ///
    /// Today's column is highlighted on every row, fully on the active task.
    /// Other cells of the active row are dimmed.
    pub fn highlight(&self, row: usize, day: usize) -> Highlight {
        let Some(row) = self.rows.get(row) else {
            return Highlight::None;
        };
        match (day == self.today, row.active) {
            (true, true) => Highlight::Full,
            (true, false) | (false, true) => Highlight::Dim,
            (false, false) => Highlight::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_id(id: i32) -> TaskId {
        TaskId::new(id).unwrap()
    }

    fn summary(id: i32, durations: [i64; DAYS_PER_WEEK]) -> WeeklySummary {
        WeeklySummary {
            task: task_id(id),
            task_name: format!("task-{id}"),
            durations,
        }
    }

    // 2025-01-15 is a Wednesday.
    fn wednesday_context(active: Option<i32>) -> TrackingContext {
        TrackingContext {
            active_task: active.map(task_id),
            today: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        }
    }

    #[test]
    fn empty_input_yields_zero() {
        let totals = WeekTotals::compute(&[], &wednesday_context(None));
        assert!(totals.is_empty());
        assert_eq!(totals.grand_total, 0);
        assert_eq!(totals.columns, [0; DAYS_PER_WEEK]);
        assert!(totals.is_consistent());
        assert!(totals.active_row().is_none());
    }

    #[test]
    fn rows_columns_and_grand_total_agree() {
        let summaries = vec![
            summary(1, [3600, 1800, 0, 0, 0, 0, 0]),
            summary(2, [0, 600, 900, 0, 0, 120, 0]),
            summary(3, [60, 60, 60, 60, 60, 60, 60]),
        ];

        let totals = WeekTotals::compute(&summaries, &wednesday_context(None));

        let row_totals: Vec<i64> = totals.rows.iter().map(|r| r.total).collect();
        assert_eq!(row_totals, [5400, 1620, 420]);
        assert_eq!(totals.columns, [3660, 2460, 960, 60, 60, 180, 60]);
        assert_eq!(totals.grand_total, 7440);
        assert_eq!(row_totals.iter().sum::<i64>(), totals.columns.iter().sum::<i64>());
        assert!(totals.is_consistent());
    }

    #[test]
    fn consistency_holds_for_generated_inputs() {
        for n in 0..20_i32 {
            let summaries: Vec<_> = (0..n)
                .map(|i| {
                    let mut durations = [0; DAYS_PER_WEEK];
                    for (day, slot) in durations.iter_mut().enumerate() {
                        *slot = i64::from(i) * 37 + day as i64 * 11;
                    }
                    summary(i, durations)
                })
                .collect();
            let totals = WeekTotals::compute(&summaries, &wednesday_context(None));
            assert!(totals.is_consistent(), "inconsistent for n = {n}");
        }
    }

    #[test]
    fn tampered_totals_are_inconsistent() {
        let summaries = vec![summary(1, [10, 0, 0, 0, 0, 0, 0])];
        let mut totals = WeekTotals::compute(&summaries, &wednesday_context(None));
        totals.grand_total += 1;
        assert!(!totals.is_consistent());
    }

    #[test]
    fn active_task_is_flagged() {
        let summaries = vec![summary(1, [0; 7]), summary(2, [0; 7])];
        let totals = WeekTotals::compute(&summaries, &wednesday_context(Some(2)));

        assert_eq!(totals.activity(), vec![(task_id(1), false), (task_id(2), true)]);
        assert_eq!(totals.active_row().map(|r| r.task), Some(task_id(2)));
        assert_eq!(totals.today, 2);
    }

    #[test]
    fn totals_are_independent_of_source() {
        let mut summaries = vec![summary(1, [100, 0, 0, 0, 0, 0, 0])];
        let totals = WeekTotals::compute(&summaries, &wednesday_context(None));

        summaries[0].durations[0] = 999;
        summaries.clear();

        assert_eq!(totals.grand_total, 100);
        assert_eq!(totals.rows[0].durations[0], 100);
    }

    #[test]
    fn highlight_today_and_active_row() {
        let summaries = vec![summary(1, [0; 7]), summary(2, [0; 7])];
        let totals = WeekTotals::compute(&summaries, &wednesday_context(Some(1)));

        assert_eq!(totals.highlight(0, 2), Highlight::Full);
        assert_eq!(totals.highlight(0, 0), Highlight::Dim);
        assert_eq!(totals.highlight(1, 2), Highlight::Dim);
        assert_eq!(totals.highlight(1, 0), Highlight::None);
        assert_eq!(totals.highlight(5, 2), Highlight::None);
    }
}
