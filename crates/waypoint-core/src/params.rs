//! Parameter structures for Waypoint operations
//!
//! Shared parameter structures usable across interfaces (CLI and any
//! future surface) without framework-specific derives. Interface layers
//! wrap these with their own derives (clap args, schema generation) and
//! convert via `into_params()`-style methods, keeping the core free of
//! framework concerns.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like show_goal, activate_goal, delete_goal,
/// complete_task, skip_task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for generating a new goal with an AI plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateGoal {
    /// Title of the goal (required)
    pub title: String,
    /// Optional detailed description of the goal
    pub description: Option<String>,
    /// Target completion date (YYYY-MM-DD); total days derive from it
    pub target_date: Option<String>,
    /// Daily time commitment, free-form (e.g. "30 minutes")
    pub daily_time: Option<String>,
    /// Kind of goal (e.g. "Learning", "Fitness")
    pub goal_type: Option<String>,
    /// Self-reported skill level (Beginner, Intermediate, Advanced)
    pub skill_level: Option<String>,
}

/// Parameters for listing goals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListGoals {
    /// Show every goal instead of only the active one
    #[serde(default)]
    pub all: bool,
}

/// Parameters for fetching (and generating, when absent) today's tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TodayTasks {
    /// Self-reported mood, forwarded as generation context
    pub mood: Option<String>,
}

/// Parameters for updating a task's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTask {
    /// Task ID to update (required)
    pub id: u64,
    /// New status for the task ('completed' or 'skipped')
    pub status: String,
}

impl UpdateTask {
    /// Validate the requested transition and return the parsed status.
    ///
    /// Tasks only move forward: the only transitions accepted here are
    /// `pending → completed` and `pending → skipped`. Requesting
    /// `pending` is rejected because it would reverse a terminal state
    /// (and is a no-op otherwise).
    ///
    /// # Errors
    ///
    /// * `TrackerError::InvalidInput` - when the status string is unknown
    ///   or names a non-terminal target state
    pub fn validate(&self) -> crate::Result<crate::models::TaskStatus> {
        use std::str::FromStr;

        use crate::models::TaskStatus;

        let status = TaskStatus::from_str(&self.status).map_err(|_| {
            crate::TrackerError::invalid_input(
                "status",
                format!(
                    "Invalid status: {}. Must be 'completed' or 'skipped'",
                    self.status
                ),
            )
        })?;

        if status == TaskStatus::Pending {
            return Err(crate::TrackerError::invalid_input(
                "status",
                "Tasks cannot be moved back to 'pending'",
            ));
        }

        Ok(status)
    }
}

/// Parameters for generating notification copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Notify {
    /// Name to address the user by
    pub user_name: Option<String>,
    /// Self-reported mood, forwarded as generation context
    pub mood: Option<String>,
    /// Time of day the notification is for (defaults to "morning")
    pub time_of_day: Option<String>,
}
