//! JSON interchange for tasks and events.
//!
//! `punch track` writes a timesheet and `punch report` reads one. This is an
//! import/export shape only; nothing is stored between runs.

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use punch_core::{EventList, TaskList};
use serde::{Deserialize, Serialize};

/// A set of tasks and the events recorded against them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timesheet {
    #[serde(default)]
    pub tasks: TaskList,
    #[serde(default)]
    pub events: EventList,
}

impl Timesheet {
    /// Parses a timesheet from a reader.
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader).context("failed to parse timesheet JSON")
    }

    /// Reads a timesheet from `path`, or from stdin when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let file = std::fs::File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                Self::read_from(std::io::BufReader::new(file))
            }
            None => Self::read_from(std::io::stdin().lock()),
        }
    }

    /// Writes the timesheet as pretty-printed JSON followed by a newline.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        serde_json::to_writer_pretty(&mut *writer, self).context("failed to write timesheet")?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_default_to_empty() {
        let sheet = Timesheet::read_from(r#"{"events": []}"#.as_bytes()).unwrap();
        assert!(sheet.tasks.is_empty());
        assert!(sheet.events.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = Timesheet::read_from("[1, 2".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("failed to parse timesheet JSON"));
    }

    #[test]
    fn load_missing_file_names_path() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing.json");
        let err = Timesheet::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
