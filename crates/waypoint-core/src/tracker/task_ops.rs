//! Task operations for the Tracker.

use jiff::Timestamp;
use serde::Serialize;
use tokio::task;

use super::{local_date, Tracker};
use crate::{
    analytics,
    db::{Database, TaskSpec},
    error::{Result, TrackerError},
    gateway::DailyContext,
    models::{Task, TaskFilter, TaskStatus},
    params::{Id, TodayTasks, UpdateTask},
};

/// Phase label reported in daily generation context when no phase matches.
const DAILY_DEFAULT_PHASE: &str = "In Progress";

/// Today's task set for the active goal, with any generated coaching copy.
#[derive(Debug, Clone, Serialize)]
pub struct TodayMission {
    /// Tasks dated today
    pub tasks: Vec<Task>,
    /// Focus line, present when tasks were generated this request
    pub focus: Option<String>,
    /// Tiny two-minute win, present when generated
    pub micro_habit: Option<String>,
    /// Coach encouragement, present when generated
    pub coach_message: Option<String>,
}

impl Tracker {
    /// Returns today's tasks for the active goal, generating them when
    /// none exist yet.
    ///
    /// The generation path derives the day number, phase, and yesterday's
    /// outcome from the goal's history, asks the gateway for a daily
    /// mission (fallback-safe), and persists the resulting tasks for
    /// today before returning them.
    pub async fn today_tasks(&self, params: &TodayTasks) -> Result<TodayMission> {
        let now = Timestamp::now();
        let today = local_date(now);

        // Read the active goal and its history
        let db_path = self.db_path.clone();
        let goal = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let profile = db.ensure_profile()?;
            db.active_goal(profile.id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??
        .ok_or(TrackerError::NoActiveGoal)?;

        let todays: Vec<Task> = goal
            .tasks
            .iter()
            .filter(|t| t.date == today)
            .cloned()
            .collect();
        if !todays.is_empty() {
            return Ok(TodayMission {
                tasks: todays,
                focus: None,
                micro_habit: None,
                coach_message: None,
            });
        }

        // Nothing scheduled yet: build the generation context
        let day = analytics::day_number(goal.created_at, now);
        let yesterday_status = match today.yesterday() {
            Ok(d) => analytics::day_status(&goal.tasks, d),
            Err(_) => crate::models::DayStatus::NotStarted,
        };

        let ctx = DailyContext {
            goal_title: goal.title.clone(),
            goal_type: goal.goal_type.clone(),
            current_day: day,
            total_days: goal.total_days,
            daily_time: goal.daily_time.clone(),
            current_phase: analytics::phase_label(&goal.phases, day, DAILY_DEFAULT_PHASE),
            yesterday_status: yesterday_status.as_past_day_str().to_string(),
            mood: params.mood.clone(),
        };

        log::info!("generating daily mission for goal '{}', day {day}", goal.title);
        let mission = self.gateway.generate_daily(&ctx).await;

        let specs: Vec<TaskSpec> = mission.tasks.iter().map(Into::into).collect();
        let db_path = self.db_path.clone();
        let goal_id = goal.id;
        let tasks = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.insert_tasks(goal_id, day, today, &specs)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(TodayMission {
            tasks,
            focus: Some(mission.focus),
            micro_habit: mission.micro_habit,
            coach_message: Some(mission.coach_message),
        })
    }

    /// Retrieves a task by its ID.
    pub async fn get_task(&self, params: &Id) -> Result<Option<Task>> {
        let db_path = self.db_path.clone();
        let task_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_task(task_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists tasks matching the filter.
    pub async fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_tasks(&filter)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Applies a validated status transition to a task.
    pub async fn update_task(&self, params: &UpdateTask) -> Result<Task> {
        let status = params.validate()?;
        self.transition_task(params.id, status).await
    }

    /// Marks a task completed and refreshes the goal's counters.
    pub async fn complete_task(&self, params: &Id) -> Result<Task> {
        self.transition_task(params.id, TaskStatus::Completed).await
    }

    /// Marks a task skipped.
    pub async fn skip_task(&self, params: &Id) -> Result<Task> {
        self.transition_task(params.id, TaskStatus::Skipped).await
    }

    async fn transition_task(&self, task_id: u64, status: TaskStatus) -> Result<Task> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_task_status(task_id, status)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
