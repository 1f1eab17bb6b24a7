//! Task model definition and related functionality.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::TaskStatus;

/// Represents a single dated, status-tracked unit of work under a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: u64,

    /// ID of the owning goal
    pub goal_id: u64,

    /// Brief title of the task
    pub title: String,

    /// Current status of the task
    pub status: TaskStatus,

    /// Time estimate in minutes
    pub time: u32,

    /// Kind of work (e.g. "Learn", "Practice")
    pub kind: Option<String>,

    /// Difficulty tag (Easy, Medium, Hard)
    pub difficulty: Option<String>,

    /// 1-based mission day this task belongs to
    pub day_number: u32,

    /// Calendar day the task is scheduled on. Immutable after creation:
    /// the streak and missed-day logic assume tasks are never backdated.
    pub date: Date,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the task was last updated (UTC)
    pub updated_at: Timestamp,
}

impl Task {
    /// Whether the task counts toward completion metrics.
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}
