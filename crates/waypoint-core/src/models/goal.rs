//! Goal model definition and plan sub-documents.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Task;

/// Represents a tracked goal with its generated plan and progress counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Unique identifier for the goal
    pub id: u64,

    /// ID of the owning profile
    pub profile_id: u64,

    /// Title of the goal
    pub title: String,

    /// Detailed description of the goal
    pub description: Option<String>,

    /// Whether this is the profile's currently active goal.
    /// At most one goal per profile is active at any time.
    #[serde(default)]
    pub is_active: bool,

    /// Target completion date as entered by the user (YYYY-MM-DD)
    pub target_date: Option<String>,

    /// Daily time commitment, free-form (e.g. "30 minutes")
    pub daily_time: Option<String>,

    /// Kind of goal (e.g. "Learning", "Fitness")
    pub goal_type: Option<String>,

    /// Self-reported skill level (Beginner, Intermediate, Advanced)
    pub skill_level: Option<String>,

    /// Total mission length in days, floored at 1
    pub total_days: u32,

    /// Strategic summary produced at plan generation
    pub summary: Option<String>,

    /// Ordered plan phases with week ranges
    #[serde(default)]
    pub phases: Vec<Phase>,

    /// Pacing rules attached to the plan
    #[serde(default)]
    pub rules: Rules,

    /// Complete day-by-day plan
    #[serde(default)]
    pub full_plan: Vec<PlanDay>,

    /// Total number of tasks ever created under this goal
    #[serde(default)]
    pub total_tasks: u32,

    /// Number of tasks currently completed
    #[serde(default)]
    pub completed_tasks: u32,

    /// Timestamp when the goal was created (UTC). Anchors the day-number
    /// computation, so it never changes after creation.
    pub created_at: Timestamp,

    /// Timestamp when the goal was last modified (UTC)
    pub updated_at: Timestamp,

    /// Associated tasks (lazy-loaded by default)
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// A named sub-range of a goal's plan covering an inclusive week interval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Phase {
    /// Phase label
    #[serde(rename = "phase")]
    pub name: String,

    /// Inclusive `[start, end]` week numbers, 1-based
    pub weeks: [u32; 2],

    /// What the phase concentrates on
    #[serde(default)]
    pub focus: String,
}

impl Phase {
    /// Whether the given 1-based week number falls inside this phase.
    pub fn contains_week(&self, week: u32) -> bool {
        self.weeks[0] <= week && week <= self.weeks[1]
    }
}

/// Pacing rules attached to a generated plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rules {
    /// Buffer days allowed per week
    #[serde(default)]
    pub buffer_days_per_week: u32,

    /// Upper bound on tasks scheduled per day
    #[serde(default = "Rules::default_max_tasks")]
    pub max_tasks_per_day: u32,

    /// Free-form advice on how to handle skipped days
    #[serde(default)]
    pub skip_logic: String,
}

impl Rules {
    fn default_max_tasks() -> u32 {
        3
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            buffer_days_per_week: 1,
            max_tasks_per_day: 3,
            skip_logic: String::new(),
        }
    }
}

/// One day of the complete generated plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanDay {
    /// 1-based day number within the plan
    pub day: u32,

    /// Theme for the day
    #[serde(default)]
    pub theme: String,

    /// Planned tasks for the day
    #[serde(default)]
    pub tasks: Vec<PlanTask>,
}

/// A single planned task inside [`PlanDay`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanTask {
    /// Task title
    pub title: String,

    /// Time estimate in minutes
    #[serde(default = "PlanTask::default_time")]
    pub time: u32,
}

impl PlanTask {
    fn default_time() -> u32 {
        30
    }
}

impl Goal {
    /// Tasks scheduled for day 1 of the full plan, if any.
    pub fn day_one_tasks(&self) -> &[PlanTask] {
        self.full_plan
            .iter()
            .find(|d| d.day == 1)
            .map(|d| d.tasks.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of planned tasks across the full plan.
    pub fn planned_task_count(&self) -> u32 {
        self.full_plan.iter().map(|d| d.tasks.len() as u32).sum()
    }
}
