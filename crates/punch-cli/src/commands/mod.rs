//! CLI subcommand implementations.

pub mod report;
pub mod track;
pub mod watch;
