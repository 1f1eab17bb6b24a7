//! Goal operations for the Tracker.

use jiff::Timestamp;
use tokio::task;

use super::{local_date, Tracker};
use crate::{
    db::{Database, TaskSpec},
    error::{Result, TrackerError},
    gateway::PlanRequest,
    models::{Goal, GoalFilter, GoalSummary},
    params::{CreateGoal, Id, ListGoals},
};

/// Plan length used when no target date is given.
const DEFAULT_TOTAL_DAYS: u32 = 30;

impl Tracker {
    /// Generates a plan for a new goal and persists it as the active one.
    ///
    /// The plan comes from the gateway and is therefore always present,
    /// possibly as the minimal fallback. Day-1 tasks are materialized
    /// immediately; later days stay in `full_plan` until their date
    /// arrives. The activation switch shares the insert transaction, so
    /// the one-active-goal invariant holds throughout.
    pub async fn generate_goal(&self, params: &CreateGoal) -> Result<Goal> {
        let total_days = Self::total_days_until(params.target_date.as_deref())?;

        let request = PlanRequest {
            title: params.title.clone(),
            total_days,
            daily_time: params.daily_time.clone(),
            goal_type: params.goal_type.clone(),
            skill_level: params.skill_level.clone(),
        };
        let plan = self.gateway.generate_plan(&request).await;

        let db_path = self.db_path.clone();
        let params = params.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let profile = db.ensure_profile()?;

            let now = Timestamp::now();
            let draft = Goal {
                id: 0,
                profile_id: profile.id,
                title: plan.goal_title.clone(),
                description: params.description.clone(),
                is_active: true,
                target_date: params.target_date.clone(),
                daily_time: params.daily_time.clone(),
                goal_type: params.goal_type.clone(),
                skill_level: params.skill_level.clone(),
                total_days: plan.total_days.max(1),
                summary: Some(plan.summary.clone()),
                phases: plan.phases.clone(),
                rules: plan.rules.clone(),
                full_plan: plan.full_plan.clone(),
                total_tasks: 0,
                completed_tasks: 0,
                created_at: now,
                updated_at: now,
                tasks: Vec::new(),
            };

            let mut goal = db.create_goal(&draft)?;

            let specs: Vec<TaskSpec> = goal.day_one_tasks().iter().map(Into::into).collect();
            goal.tasks = db.insert_tasks(goal.id, 1, local_date(now), &specs)?;
            goal.total_tasks = goal.tasks.len() as u32;

            Ok(goal)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a goal by its ID with tasks loaded.
    pub async fn get_goal(&self, params: &Id) -> Result<Option<Goal>> {
        let db_path = self.db_path.clone();
        let goal_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_goal(goal_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists goal summaries, either the active goal or every goal.
    pub async fn list_goals(&self, params: &ListGoals) -> Result<Vec<GoalSummary>> {
        let db_path = self.db_path.clone();
        let filter = GoalFilter::from(params);

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_summaries(Some(&filter))
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Makes the given goal the only active one for the profile.
    /// Returns None when the goal doesn't exist.
    pub async fn activate_goal(&self, params: &Id) -> Result<Option<Goal>> {
        let db_path = self.db_path.clone();
        let goal_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let profile = db.ensure_profile()?;
            db.activate_goal(profile.id, goal_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Permanently deletes a goal and all its associated tasks.
    /// This operation cannot be undone.
    pub async fn delete_goal(&self, params: &Id) -> Result<()> {
        let db_path = self.db_path.clone();
        let goal_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_goal(goal_id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Whole days from today to the target date, floored at 1.
    /// Defaults to [`DEFAULT_TOTAL_DAYS`] when no target is given.
    fn total_days_until(target_date: Option<&str>) -> Result<u32> {
        let Some(raw) = target_date else {
            return Ok(DEFAULT_TOTAL_DAYS);
        };

        let target = raw
            .parse::<jiff::civil::Date>()
            .map_err(|e| TrackerError::invalid_input("target_date", e.to_string()))?;
        let today = local_date(Timestamp::now());

        let days = today
            .until(target)
            .map_err(|e| TrackerError::invalid_input("target_date", e.to_string()))?
            .get_days()
            .unsigned_abs();

        Ok(days.max(1))
    }
}
