//! Filter types for querying goals and tasks.

use jiff::{civil::Date, Timestamp};

use super::TaskStatus;

/// Filter options for querying goals.
#[derive(Debug, Clone, Default)]
pub struct GoalFilter {
    /// Filter by goal title (case-insensitive partial match)
    pub title_contains: Option<String>,

    /// Only return the active goal
    pub active_only: bool,

    /// Filter by creation date range
    pub created_after: Option<Timestamp>,
    pub created_before: Option<Timestamp>,
}

impl From<&crate::params::ListGoals> for GoalFilter {
    /// Convert ListGoals parameters to a GoalFilter for goal queries.
    ///
    /// - `all: false` → only the active goal
    /// - `all: true` → every goal, newest first
    fn from(params: &crate::params::ListGoals) -> Self {
        Self {
            active_only: !params.all,
            ..Default::default()
        }
    }
}

/// Filter options for querying tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Restrict to a single goal
    pub goal_id: Option<u64>,

    /// Restrict to a single calendar day
    pub date: Option<Date>,

    /// Restrict to a single status
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    /// Tasks of one goal on one calendar day.
    pub fn for_goal_on(goal_id: u64, date: Date) -> Self {
        Self {
            goal_id: Some(goal_id),
            date: Some(date),
            ..Default::default()
        }
    }
}
