//! Typed generation payloads and their fallback values.
//!
//! Each generation operation deserializes the model's JSON into one of
//! these types. Every type carries a `fallback` constructor producing the
//! minimal well-formed payload for its operation; the gateway substitutes
//! it whenever generation fails irrecoverably, so callers always receive
//! a usable value.

use serde::{Deserialize, Serialize};

use super::prompts::{DailyContext, NotificationContext, PlanRequest, SummaryContext};
use crate::models::{Phase, PlanDay, PlanTask, Rules};

/// Complete plan payload from plan generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    /// Title echoed (possibly polished) by the model
    pub goal_title: String,
    /// Plan length in days
    pub total_days: u32,
    /// Strategic overview text
    #[serde(default)]
    pub summary: String,
    /// Day-by-day plan
    #[serde(default)]
    pub full_plan: Vec<PlanDay>,
    /// Plan phases with week ranges
    #[serde(default)]
    pub phases: Vec<Phase>,
    /// Pacing rules
    #[serde(default)]
    pub rules: Rules,
}

impl GeneratedPlan {
    /// Minimal one-day plan used when generation fails.
    pub fn fallback(req: &PlanRequest) -> Self {
        Self {
            goal_title: req.title.clone(),
            total_days: req.safe_total_days(),
            summary: "The roadmap could not be generated right now, but your \
                      target is locked in."
                .to_string(),
            full_plan: vec![PlanDay {
                day: 1,
                theme: "Self-Start".to_string(),
                tasks: vec![PlanTask {
                    title: format!("Research the basics of {}", req.title),
                    time: 30,
                }],
            }],
            phases: vec![Phase {
                name: "Kickoff".to_string(),
                weeks: [1, 1],
                focus: "Fundamentals".to_string(),
            }],
            rules: Rules {
                buffer_days_per_week: 1,
                max_tasks_per_day: 3,
                skip_logic: "Stay consistent.".to_string(),
            },
        }
    }
}

/// One generated task inside a daily mission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MissionTask {
    /// Task title
    pub title: String,
    /// Time estimate in minutes
    #[serde(default = "MissionTask::default_time")]
    pub time: u32,
    /// Kind of work
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Difficulty tag
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl MissionTask {
    fn default_time() -> u32 {
        30
    }
}

/// Today's task set from daily generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyMission {
    /// Mission day the tasks belong to
    pub day: u32,
    /// Brief focus for the day
    #[serde(default)]
    pub focus: String,
    /// Tiny two-minute win
    #[serde(default)]
    pub micro_habit: Option<String>,
    /// Actionable tasks for the day
    pub tasks: Vec<MissionTask>,
    /// Short encouragement shown with the tasks
    #[serde(default)]
    pub coach_message: String,
}

impl DailyMission {
    /// Generic single-task mission used when generation fails.
    pub fn fallback(ctx: &DailyContext) -> Self {
        Self {
            day: ctx.current_day,
            focus: "Keep moving forward".to_string(),
            micro_habit: None,
            tasks: vec![MissionTask {
                title: format!("Continue work on {}", ctx.goal_title),
                time: 30,
                kind: Some("Practice".to_string()),
                difficulty: Some("Medium".to_string()),
            }],
            coach_message: "One small step today, one giant leap tomorrow.".to_string(),
        }
    }
}

/// Dashboard summary payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Title of the summarized goal
    pub goal_title: String,
    /// Mission coverage percentage
    #[serde(default)]
    pub progress_percentage: u8,
    /// One-line day status
    #[serde(default)]
    pub day_status_text: String,
    /// One-line streak callout
    #[serde(default)]
    pub streak_text: String,
    /// Supportive insight derived from the metrics
    #[serde(default)]
    pub ai_insight: String,
    /// Suggested next action
    #[serde(default)]
    pub primary_action: String,
}

impl DashboardSummary {
    /// Generic summary used when generation fails; metric-derived fields
    /// still come from real analytics so the numbers stay truthful.
    pub fn fallback(ctx: &SummaryContext) -> Self {
        Self {
            goal_title: ctx.goal_title.clone(),
            progress_percentage: ctx.progress_percentage,
            day_status_text: format!("Day {} of {}", ctx.current_day, ctx.total_days),
            streak_text: format!("{} day streak", ctx.current_streak),
            ai_insight: "You're doing great! Keep it up.".to_string(),
            primary_action: "Complete today's priority task.".to_string(),
        }
    }
}

/// Notification copy payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationCopy {
    /// Notification title
    pub title: String,
    /// Notification body
    pub message: String,
    /// Call-to-action label
    #[serde(default)]
    pub cta: String,
}

impl NotificationCopy {
    /// Generic nudge used when generation fails.
    pub fn fallback(ctx: &NotificationContext) -> Self {
        Self {
            title: "Keep going!".to_string(),
            message: format!("Time to work on {}.", ctx.goal_title),
            cta: "Open Waypoint".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::extract::extract_payload;

    #[test]
    fn test_generated_plan_parses_camel_case() {
        let text = r#"{
            "goalTitle": "Learn Rust",
            "totalDays": 30,
            "summary": "A month of fundamentals",
            "fullPlan": [
                {"day": 1, "theme": "Kickoff", "tasks": [{"title": "Install toolchain", "time": 20}]}
            ],
            "phases": [{"phase": "Kickoff", "weeks": [1, 2], "focus": "Basics"}],
            "rules": {"bufferDaysPerWeek": 1, "maxTasksPerDay": 3, "skipLogic": "Catch up next day"}
        }"#;

        let plan: GeneratedPlan = extract_payload(text).unwrap();
        assert_eq!(plan.goal_title, "Learn Rust");
        assert_eq!(plan.full_plan[0].tasks[0].time, 20);
        assert_eq!(plan.phases[0].weeks, [1, 2]);
        assert_eq!(plan.rules.max_tasks_per_day, 3);
    }

    #[test]
    fn test_daily_mission_type_field_renames_to_kind() {
        let text = r#"{
            "day": 3,
            "focus": "Ship something",
            "tasks": [{"title": "Write a parser", "time": 45, "type": "Practice", "difficulty": "Hard"}],
            "coachMessage": "Go"
        }"#;

        let mission: DailyMission = extract_payload(text).unwrap();
        assert_eq!(mission.tasks[0].kind.as_deref(), Some("Practice"));
        assert_eq!(mission.micro_habit, None);
    }

    #[test]
    fn test_plan_fallback_floors_days_and_has_one_entry() {
        let req = PlanRequest {
            title: "Run a 10k".to_string(),
            total_days: 0,
            ..Default::default()
        };
        let plan = GeneratedPlan::fallback(&req);
        assert_eq!(plan.total_days, 1);
        assert_eq!(plan.full_plan.len(), 1);
        assert_eq!(plan.full_plan[0].day, 1);
        assert!(!plan.phases.is_empty());
    }

    #[test]
    fn test_summary_fallback_keeps_real_metrics() {
        let ctx = SummaryContext {
            goal_title: "Run a 10k".to_string(),
            total_days: 30,
            current_day: 12,
            current_streak: 4,
            progress_percentage: 40,
            ..Default::default()
        };
        let summary = DashboardSummary::fallback(&ctx);
        assert_eq!(summary.progress_percentage, 40);
        assert_eq!(summary.streak_text, "4 day streak");
        assert_eq!(summary.day_status_text, "Day 12 of 30");
    }
}
