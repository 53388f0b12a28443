//! Weekly report: one row per task, one column per weekday.
//!
//! This module implements `punch report`, reading a timesheet and printing
//! this week's totals as a text table or as JSON.

use std::io::Write;

use anyhow::Result;
use chrono::{NaiveDate, TimeZone};
use punch_core::{DAYS_PER_WEEK, InstallationId, WeekTotals, week_start_for};

use crate::controller::TrackingController;
use crate::timesheet::Timesheet;

const DAY_NAMES: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Longest task name shown before eliding.
const MAX_NAME_WIDTH: usize = 24;

// ========== Duration Formatting ==========

/// Formats seconds as `H:MM`. Negative durations are shown as `0:00`.
pub fn hours_and_minutes(secs: i64) -> String {
    let total_minutes = secs.max(0) / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    format!("{hours}:{minutes:02}")
}

/// Shortens `name` to `width` characters by replacing its middle with `…`.
fn elide(name: &str, width: usize) -> String {
    let len = name.chars().count();
    if len <= width {
        return name.to_string();
    }
    let kept = width.saturating_sub(1);
    let tail = kept / 2;
    let head: String = name.chars().take(kept - tail).collect();
    let tail: String = name.chars().skip(len - tail).collect();
    format!("{head}…{tail}")
}

// ========== Report Generation ==========

/// Computes totals for the week containing `today`, bucketing in `tz`.
///
/// The task of the newest in-progress event is reported as active.
pub fn week_totals<Tz: TimeZone>(sheet: &Timesheet, today: NaiveDate, tz: &Tz) -> WeekTotals {
    TrackingController::from_timesheet(InstallationId::default(), sheet.clone())
        .week_totals(today, tz)
}

/// Writes the human-readable week table.
///
/// Today's column header is bracketed and the active task, if any, is marked
/// with `*`. Days without time are left blank.
pub fn write_table<W: Write>(writer: &mut W, totals: &WeekTotals, week_start: NaiveDate) -> Result<()> {
    writeln!(writer, "Week of {}", week_start.format("%b %-d, %Y"))?;

    if totals.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "No events recorded this week.")?;
        return Ok(());
    }

    let width = totals
        .rows
        .iter()
        .map(|r| r.task_name.chars().count())
        .max()
        .unwrap_or(0)
        .clamp("Total".len(), MAX_NAME_WIDTH);

    writeln!(writer)?;
    write!(writer, "  {:<width$}", "Task")?;
    for (day, name) in DAY_NAMES.iter().enumerate() {
        if day == totals.today {
            write!(writer, "{:>6}", format!("[{name}]"))?;
        } else {
            write!(writer, "{name:>6}")?;
        }
    }
    writeln!(writer, "{:>7}", "Total")?;

    for row in &totals.rows {
        let marker = if row.active { "* " } else { "  " };
        write!(writer, "{marker}{:<width$}", elide(&row.task_name, width))?;
        for duration in row.durations {
            let cell = if duration > 0 {
                hours_and_minutes(duration)
            } else {
                String::new()
            };
            write!(writer, "{cell:>6}")?;
        }
        writeln!(writer, "{:>7}", hours_and_minutes(row.total))?;
    }

    write!(writer, "  {:<width$}", "Total")?;
    for column in totals.columns {
        write!(writer, "{:>6}", hours_and_minutes(column))?;
    }
    writeln!(writer, "{:>7}", hours_and_minutes(totals.grand_total))?;

    Ok(())
}

/// Runs the report command against `sheet`.
pub fn run<W: Write, Tz: TimeZone>(
    writer: &mut W,
    sheet: &Timesheet,
    today: NaiveDate,
    tz: &Tz,
    json: bool,
) -> Result<()> {
    let totals = week_totals(sheet, today, tz);
    if json {
        serde_json::to_writer_pretty(&mut *writer, &totals)?;
        writeln!(writer)?;
    } else {
        write_table(writer, &totals, week_start_for(today))?;
    }
    Ok(())
}
