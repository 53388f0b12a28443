//! Idle-aware time tracker CLI library.
//!
//! Wires the tracking model from `punch-core` to idle detection from
//! `punch-idle` behind the `punch` command.

mod cli;
pub mod commands;
mod config;
pub mod controller;
pub mod timesheet;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use controller::TrackingController;
pub use timesheet::Timesheet;
