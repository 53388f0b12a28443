//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Idle-aware time tracker.
///
/// Records time against tasks and stops recording on its own when you walk
/// away from the machine.
#[derive(Debug, Parser)]
#[command(name = "punch", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Watch for idle periods and report each one.
    Watch {
        /// Idle threshold in seconds (overrides config).
        #[arg(long)]
        threshold: Option<u64>,
    },

    /// Record time against a task until idle or interrupted.
    ///
    /// Prints the recorded timesheet as JSON on exit.
    Track {
        /// The task ID to record against.
        #[arg(long)]
        task: i32,

        /// Display name for the task.
        #[arg(long)]
        name: Option<String>,

        /// Comment stored on the event.
        #[arg(long)]
        comment: Option<String>,

        /// Idle threshold in seconds (overrides config).
        #[arg(long)]
        threshold: Option<u64>,
    },

    /// Show the weekly summary for a timesheet.
    Report {
        /// Timesheet JSON file. Reads stdin when omitted.
        #[arg(long)]
        input: Option<PathBuf>,

        /// Any date in the week to report (default: today).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}
