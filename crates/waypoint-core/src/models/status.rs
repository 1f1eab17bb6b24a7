//! Status enumerations for tasks and calendar days.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of task statuses.
///
/// `Completed` and `Skipped` are terminal: a task never transitions out of
/// either state. The streak and progress counters rely on this.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task is waiting to be worked on
    #[default]
    Pending,

    /// Task has been completed
    Completed,

    /// Task was deliberately skipped
    Skipped,
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "completed" => Ok(TaskStatus::Completed),
            "skipped" => Ok(TaskStatus::Skipped),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

impl TaskStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
            TaskStatus::Skipped => "skipped",
        }
    }

    /// Whether the status is terminal (no further transitions allowed).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TaskStatus::Pending)
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use waypoint_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(TaskStatus::Skipped.with_icon(), "↷ Skipped");
    /// assert_eq!(TaskStatus::Pending.with_icon(), "○ Pending");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "✓ Completed",
            TaskStatus::Skipped => "↷ Skipped",
            TaskStatus::Pending => "○ Pending",
        }
    }
}

/// Aggregate completion state of a single calendar day.
///
/// Derived from the statuses of every task dated that day; never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// At least one task exists and all of them are completed
    Completed,

    /// Tasks exist but not all are completed yet
    InProgress,

    /// No tasks exist for the day
    NotStarted,
}

impl DayStatus {
    /// Convert to the string representation used in prompt context.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::Completed => "completed",
            DayStatus::InProgress => "in_progress",
            DayStatus::NotStarted => "not_started",
        }
    }

    /// Collapse to the two-valued form used for past days: a day that was
    /// not fully completed counts as skipped.
    pub fn as_past_day_str(&self) -> &'static str {
        match self {
            DayStatus::Completed => "completed",
            _ => "skipped",
        }
    }
}
