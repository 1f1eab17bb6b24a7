//! Derived-view operations for the Tracker: stats, dashboard, notifications.

use jiff::Timestamp;
use serde::Serialize;
use tokio::task;

use super::{local_date, Tracker};
use crate::{
    analytics::{ProgressReport, StatsReport},
    db::Database,
    error::{Result, TrackerError},
    gateway::{DashboardSummary, NotificationContext, NotificationCopy, SummaryContext},
    models::{Goal, GoalFilter, GoalSummary},
    params::Notify,
};

/// Phase label reported on the dashboard when no phase matches.
const DASHBOARD_DEFAULT_PHASE: &str = "Operational";

/// Dashboard payload: real metrics plus generated summary copy.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// ID of the summarized goal
    pub goal_id: u64,
    /// Recomputed metrics for the active goal
    pub report: ProgressReport,
    /// Generated (or fallback) summary copy
    pub summary: DashboardSummary,
    /// The profile's other goals, newest first
    pub other_goals: Vec<GoalSummary>,
}

impl Tracker {
    /// Trailing 7-day activity report across all of the profile's goals.
    pub async fn stats(&self) -> Result<StatsReport> {
        let db_path = self.db_path.clone();
        let tasks = task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let profile = db.ensure_profile()?;
            db.tasks_for_profile(profile.id)
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(StatsReport::compute(&tasks, local_date(Timestamp::now())))
    }

    /// Progress metrics for the active goal, recomputed from scratch.
    pub async fn progress(&self) -> Result<ProgressReport> {
        let goal = self.require_active_goal().await?;
        let now = Timestamp::now();
        Ok(ProgressReport::compute(
            &goal,
            &goal.tasks,
            now,
            local_date(now),
            DASHBOARD_DEFAULT_PHASE,
        ))
    }

    /// Full dashboard: metrics plus generated summary copy.
    ///
    /// The metric fields are computed locally and stay truthful even when
    /// the summary copy comes from the fallback.
    pub async fn dashboard(&self) -> Result<DashboardView> {
        let goal = self.require_active_goal().await?;
        let now = Timestamp::now();
        let report = ProgressReport::compute(
            &goal,
            &goal.tasks,
            now,
            local_date(now),
            DASHBOARD_DEFAULT_PHASE,
        );

        let ctx = SummaryContext {
            goal_title: goal.title.clone(),
            total_days: goal.total_days,
            current_day: report.day_number,
            days_completed: report.days_completed,
            days_missed: report.missed_days,
            current_streak: report.streak,
            weekly_rate: report.weekly_rate,
            progress_percentage: report.progress_percentage,
            avg_time: report.average_focus.clone(),
            current_phase: report.phase.clone(),
            today_status: report.today_status.as_str().to_string(),
        };
        let summary = self.gateway.generate_summary(&ctx).await;

        let db_path = self.db_path.clone();
        let active_id = goal.id;
        let other_goals = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let all = db.list_summaries(Some(&GoalFilter::default()))?;
            Ok::<_, TrackerError>(all.into_iter().filter(|g| g.id != active_id).collect())
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(DashboardView {
            goal_id: goal.id,
            report,
            summary,
            other_goals,
        })
    }

    /// Generated notification copy for the active goal.
    ///
    /// With no goal at all this still answers with an onboarding nudge;
    /// notification delivery must never observe an error.
    pub async fn notification(&self, params: &Notify) -> Result<NotificationCopy> {
        let goal = match self.active_or_latest_goal().await? {
            Some(goal) => goal,
            None => {
                return Ok(NotificationCopy {
                    title: "Start a mission!".to_string(),
                    message: "Set your first goal to begin the journey.".to_string(),
                    cta: "Open Waypoint".to_string(),
                })
            }
        };

        let now = Timestamp::now();
        let today = local_date(now);
        let report = ProgressReport::compute(
            &goal,
            &goal.tasks,
            now,
            today,
            DASHBOARD_DEFAULT_PHASE,
        );

        let ctx = NotificationContext {
            user_name: params.user_name.clone(),
            goal_title: goal.title.clone(),
            current_day: report.day_number,
            total_days: goal.total_days,
            today_status: report.today_status.as_str().to_string(),
            yesterday_status: report.yesterday_status.as_past_day_str().to_string(),
            current_streak: report.streak,
            weekly_rate: report.weekly_rate,
            mood: params.mood.clone(),
            time_of_day: params.time_of_day.clone(),
        };

        Ok(self.gateway.generate_notification(&ctx).await)
    }

    /// The active goal with tasks loaded, or `NoActiveGoal`.
    ///
    /// When no goal is active but goals exist, the newest one is
    /// activated first, so a dashboard request self-heals after the
    /// active goal was deleted.
    async fn require_active_goal(&self) -> Result<Goal> {
        self.active_or_latest_goal()
            .await?
            .ok_or(TrackerError::NoActiveGoal)
    }

    async fn active_or_latest_goal(&self) -> Result<Option<Goal>> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let profile = db.ensure_profile()?;

            if let Some(goal) = db.active_goal(profile.id)? {
                return Ok(Some(goal));
            }

            // No active goal: promote the newest one, if any
            let all = db.list_summaries(Some(&GoalFilter::default()))?;
            match all.first() {
                Some(latest) => {
                    log::info!("no active goal, activating latest goal {}", latest.id);
                    db.activate_goal(profile.id, latest.id)
                }
                None => Ok(None),
            }
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
