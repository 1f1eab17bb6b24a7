//! Goal summary types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Goal, TaskStatus};

/// Summary information about a goal with task statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalSummary {
    /// Goal ID
    pub id: u64,
    /// Title of the goal
    pub title: String,
    /// Kind of goal
    pub goal_type: Option<String>,
    /// Whether this is the active goal
    pub is_active: bool,
    /// Total mission length in days
    pub total_days: u32,
    /// Total number of tasks created under the goal
    pub total_tasks: u32,
    /// Number of completed tasks
    pub completed_tasks: u32,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
}

impl GoalSummary {
    /// Create a GoalSummary from a Goal and task counts.
    pub fn from_goal(goal: Goal, total_tasks: u32, completed_tasks: u32) -> Self {
        Self {
            id: goal.id,
            title: goal.title,
            goal_type: goal.goal_type,
            is_active: goal.is_active,
            total_days: goal.total_days,
            total_tasks,
            completed_tasks,
            created_at: goal.created_at,
            updated_at: goal.updated_at,
        }
    }
}

impl From<&Goal> for GoalSummary {
    fn from(goal: &Goal) -> Self {
        let total_tasks = goal.tasks.len() as u32;
        let completed_tasks = goal
            .tasks
            .iter()
            .filter(|task| task.status == TaskStatus::Completed)
            .count() as u32;

        Self {
            id: goal.id,
            title: goal.title.clone(),
            goal_type: goal.goal_type.clone(),
            is_active: goal.is_active,
            total_days: goal.total_days,
            total_tasks,
            completed_tasks,
            created_at: goal.created_at,
            updated_at: goal.updated_at,
        }
    }
}
