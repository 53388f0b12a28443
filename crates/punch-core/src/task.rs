//! Trackable tasks.

use serde::{Deserialize, Serialize};

use crate::types::TaskId;

/// A named unit of work that time can be logged against.
///
/// Whether a task is currently being tracked is not part of the task itself;
/// see [`TrackingContext`](crate::TrackingContext).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
}

impl Task {
    /// Creates a task with the given ID and name.
    pub fn new(id: TaskId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A list of tasks.
pub type TaskList = Vec<Task>;
