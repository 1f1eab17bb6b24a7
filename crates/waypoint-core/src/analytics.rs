//! Progress analytics over a goal's task history.
//!
//! Everything here is a pure computation over a goal's creation timestamp
//! and its tasks' `{date, status, time, created_at}` records. Nothing is
//! cached or persisted: every caller recomputes from whatever records it
//! was handed, so two concurrent requests may disagree when a write races
//! between them. That is acceptable; these are advisory metrics.
//!
//! Calendar semantics:
//!
//! - The **day number** is `ceil(|now - created_at| in days)`, floored
//!   at 1, so a goal created moments ago is already on day 1.
//! - A day is **fully complete** when it has at least one task and every
//!   task dated that day is completed.
//! - The **streak** walks backward from today (or from yesterday when
//!   today is not yet fully complete) counting consecutive fully-complete
//!   days.
//! - Phases are matched by integer week number `ceil(day_number / 7)`
//!   against their inclusive `[start, end]` week range.

use std::collections::BTreeMap;

use jiff::{civil::Date, Timestamp};
use serde::Serialize;

use crate::models::{DayStatus, Goal, Phase, Task, TaskStatus};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Current 1-based mission day for a goal created at `created_at`.
pub fn day_number(created_at: Timestamp, now: Timestamp) -> u32 {
    let elapsed = (now.as_second() - created_at.as_second()).unsigned_abs();
    let days = (elapsed as f64 / SECONDS_PER_DAY).ceil() as u32;
    days.max(1)
}

/// 1-based week number for a 1-based day number.
pub fn current_week(day_number: u32) -> u32 {
    day_number.max(1).div_ceil(7)
}

/// Label of the first phase whose week range contains the current week,
/// or `default` when none matches.
pub fn phase_label(phases: &[Phase], day_number: u32, default: &str) -> String {
    let week = current_week(day_number);
    phases
        .iter()
        .find(|p| p.contains_week(week))
        .map(|p| p.name.clone())
        .unwrap_or_else(|| default.to_string())
}

/// Per-date `(completed, total)` task counts, ordered by date.
fn counts_by_date(tasks: &[Task]) -> BTreeMap<Date, (u32, u32)> {
    let mut by_date: BTreeMap<Date, (u32, u32)> = BTreeMap::new();
    for task in tasks {
        let entry = by_date.entry(task.date).or_insert((0, 0));
        entry.1 += 1;
        if task.is_completed() {
            entry.0 += 1;
        }
    }
    by_date
}

fn is_fully_complete(counts: &BTreeMap<Date, (u32, u32)>, date: Date) -> bool {
    matches!(counts.get(&date), Some(&(completed, total)) if total > 0 && completed == total)
}

/// Aggregate status of the tasks dated `date`.
pub fn day_status(tasks: &[Task], date: Date) -> DayStatus {
    let day_tasks: Vec<&Task> = tasks.iter().filter(|t| t.date == date).collect();
    if day_tasks.is_empty() {
        DayStatus::NotStarted
    } else if day_tasks.iter().all(|t| t.is_completed()) {
        DayStatus::Completed
    } else {
        DayStatus::InProgress
    }
}

/// Count of consecutive fully-complete calendar days ending at `today`,
/// or at yesterday when today is not fully complete yet.
pub fn streak(tasks: &[Task], today: Date) -> u32 {
    let counts = counts_by_date(tasks);

    let mut cursor = if is_fully_complete(&counts, today) {
        today
    } else {
        match today.yesterday() {
            Ok(d) => d,
            Err(_) => return 0,
        }
    };

    let mut run = 0;
    while is_fully_complete(&counts, cursor) {
        run += 1;
        cursor = match cursor.yesterday() {
            Ok(d) => d,
            Err(_) => break,
        };
    }
    run
}

/// Completion percentage among tasks *created* in the trailing 7 days.
///
/// Keyed on creation timestamp, not the `date` field, so regenerated or
/// late-added tasks count toward the week they were actually created in.
/// Returns 0 when no tasks qualify.
pub fn weekly_rate(tasks: &[Task], now: Timestamp) -> u8 {
    let cutoff = now.as_second() - 7 * 86_400;
    let recent: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.created_at.as_second() >= cutoff)
        .collect();

    if recent.is_empty() {
        return 0;
    }

    let completed = recent.iter().filter(|t| t.is_completed()).count();
    ((completed as f64 / recent.len() as f64) * 100.0).round() as u8
}

/// Number of distinct past dates (today excluded) with at least one
/// uncompleted task.
pub fn missed_days(tasks: &[Task], today: Date) -> u32 {
    counts_by_date(tasks)
        .iter()
        .filter(|(date, (completed, total))| **date != today && completed < total)
        .count() as u32
}

/// Number of distinct dates holding at least one completed task.
pub fn days_completed(tasks: &[Task]) -> u32 {
    counts_by_date(tasks)
        .values()
        .filter(|(completed, _)| *completed > 0)
        .count() as u32
}

/// Average minutes of completed work per day that saw any completion,
/// formatted as `"<n>m"`. `"0m"` when nothing is completed.
pub fn average_focus(tasks: &[Task]) -> String {
    let days = days_completed(tasks);
    if days == 0 {
        return "0m".to_string();
    }

    let total_minutes: u32 = tasks
        .iter()
        .filter(|t| t.is_completed())
        .map(|t| t.time)
        .sum();
    format!("{}m", (f64::from(total_minutes) / f64::from(days)).round() as u32)
}

/// Percentage of the mission covered by days with completions.
pub fn progress_percentage(days_completed: u32, total_days: u32) -> u8 {
    if total_days == 0 {
        return 0;
    }
    let pct = (f64::from(days_completed) / f64::from(total_days)) * 100.0;
    pct.round().min(100.0) as u8
}

/// Full set of derived metrics for one goal, recomputed per request.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    /// Current 1-based mission day
    pub day_number: u32,
    /// Current 1-based week number
    pub week: u32,
    /// Label of the matching phase, or the caller's default
    pub phase: String,
    /// Consecutive fully-complete days ending at today or yesterday
    pub streak: u32,
    /// Completion percentage of tasks created in the trailing 7 days
    pub weekly_rate: u8,
    /// Past dates with at least one uncompleted task
    pub missed_days: u32,
    /// Distinct dates with at least one completed task
    pub days_completed: u32,
    /// Mission coverage percentage derived from `days_completed`
    pub progress_percentage: u8,
    /// Average completed minutes per completed day, e.g. "25m"
    pub average_focus: String,
    /// Aggregate status of today's tasks
    pub today_status: DayStatus,
    /// Aggregate status of yesterday's tasks
    pub yesterday_status: DayStatus,
}

impl ProgressReport {
    /// Compute every metric for `goal` from its `tasks`.
    ///
    /// `default_phase` is the label reported while no phase matches the
    /// current week.
    pub fn compute(
        goal: &Goal,
        tasks: &[Task],
        now: Timestamp,
        today: Date,
        default_phase: &str,
    ) -> Self {
        let day = day_number(goal.created_at, now);
        let completed_days = days_completed(tasks);
        let yesterday_status = match today.yesterday() {
            Ok(d) => day_status(tasks, d),
            Err(_) => DayStatus::NotStarted,
        };

        Self {
            day_number: day,
            week: current_week(day),
            phase: phase_label(&goal.phases, day, default_phase),
            streak: streak(tasks, today),
            weekly_rate: weekly_rate(tasks, now),
            missed_days: missed_days(tasks, today),
            days_completed: completed_days,
            progress_percentage: progress_percentage(completed_days, goal.total_days),
            average_focus: average_focus(tasks),
            today_status: day_status(tasks, today),
            yesterday_status,
        }
    }
}

/// One trailing-week history entry.
#[derive(Debug, Clone, Serialize)]
pub struct DailyHistory {
    /// Calendar day
    pub date: Date,
    /// Completed task count on that day
    pub completed: u32,
    /// Total task count on that day
    pub total: u32,
}

/// Trailing 7-day activity report across all of a profile's tasks.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    /// Oldest-first entries for the trailing 7 calendar days
    pub history: Vec<DailyHistory>,
    /// Current streak
    pub streak: u32,
    /// Completed task count across the entire history
    pub total_completed: u32,
    /// Whether yesterday had tasks and not all were completed
    pub missed_yesterday: bool,
}

impl StatsReport {
    /// Compute the trailing-week report ending at `today`.
    pub fn compute(tasks: &[Task], today: Date) -> Self {
        let counts = counts_by_date(tasks);

        let mut window = Vec::with_capacity(7);
        let mut cursor = today;
        for _ in 0..7 {
            let (completed, total) = counts.get(&cursor).copied().unwrap_or((0, 0));
            window.push(DailyHistory {
                date: cursor,
                completed,
                total,
            });
            cursor = match cursor.yesterday() {
                Ok(d) => d,
                Err(_) => break,
            };
        }
        window.reverse();

        let missed_yesterday = match today.yesterday() {
            Ok(d) => counts
                .get(&d)
                .is_some_and(|(completed, total)| *total > 0 && completed < total),
            Err(_) => false,
        };

        Self {
            history: window,
            streak: streak(tasks, today),
            total_completed: tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Completed)
                .count() as u32,
            missed_yesterday,
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::Rules;

    fn task_on(day: Date, status: TaskStatus, time: u32, created_at: Timestamp) -> Task {
        Task {
            id: 0,
            goal_id: 1,
            title: "t".to_string(),
            status,
            time,
            kind: None,
            difficulty: None,
            day_number: 1,
            date: day,
            created_at,
            updated_at: created_at,
        }
    }

    fn ts(s: &str) -> Timestamp {
        s.parse().expect("valid timestamp")
    }

    fn goal_with(created_at: Timestamp, total_days: u32, phases: Vec<Phase>) -> Goal {
        Goal {
            id: 1,
            profile_id: 1,
            title: "Learn Rust".to_string(),
            description: None,
            is_active: true,
            target_date: None,
            daily_time: None,
            goal_type: None,
            skill_level: None,
            total_days,
            summary: None,
            phases,
            rules: Rules::default(),
            full_plan: vec![],
            total_tasks: 0,
            completed_tasks: 0,
            created_at,
            updated_at: created_at,
            tasks: vec![],
        }
    }

    #[test]
    fn test_day_number_same_instant_is_one() {
        let now = ts("2026-08-06T12:00:00Z");
        assert_eq!(day_number(now, now), 1);
    }

    #[test]
    fn test_day_number_rounds_up() {
        let created = ts("2026-08-03T12:00:00Z");
        let now = ts("2026-08-06T09:00:00Z");
        // 2.875 elapsed days round up to day 3
        assert_eq!(day_number(created, now), 3);
    }

    #[test]
    fn test_current_week_boundaries() {
        assert_eq!(current_week(1), 1);
        assert_eq!(current_week(7), 1);
        assert_eq!(current_week(8), 2);
        assert_eq!(current_week(14), 2);
        assert_eq!(current_week(15), 3);
    }

    #[test]
    fn test_phase_label_matches_first_week() {
        let phases = vec![
            Phase {
                name: "Kickoff".to_string(),
                weeks: [1, 1],
                focus: "Fundamentals".to_string(),
            },
            Phase {
                name: "Build".to_string(),
                weeks: [2, 3],
                focus: "Practice".to_string(),
            },
        ];

        // Day 3 sits in week 1
        assert_eq!(phase_label(&phases, 3, "Operational"), "Kickoff");
        // Day 10 sits in week 2
        assert_eq!(phase_label(&phases, 10, "Operational"), "Build");
        // Day 28 sits in week 4, past every phase
        assert_eq!(phase_label(&phases, 28, "Operational"), "Operational");
    }

    #[test]
    fn test_phase_label_empty_phases_uses_default() {
        assert_eq!(phase_label(&[], 5, "In Progress"), "In Progress");
    }

    #[test]
    fn test_streak_three_unbroken_days() {
        let today = date(2026, 8, 6);
        let created = ts("2026-08-01T08:00:00Z");
        let tasks = vec![
            task_on(date(2026, 8, 4), TaskStatus::Completed, 30, created),
            task_on(date(2026, 8, 5), TaskStatus::Completed, 30, created),
            task_on(date(2026, 8, 6), TaskStatus::Completed, 30, created),
        ];
        assert_eq!(streak(&tasks, today), 3);
    }

    #[test]
    fn test_streak_stops_at_gap() {
        let today = date(2026, 8, 6);
        let created = ts("2026-08-01T08:00:00Z");
        // Aug 4 has a pending task: the run ends there.
        let tasks = vec![
            task_on(date(2026, 8, 3), TaskStatus::Completed, 30, created),
            task_on(date(2026, 8, 4), TaskStatus::Pending, 30, created),
            task_on(date(2026, 8, 5), TaskStatus::Completed, 30, created),
            task_on(date(2026, 8, 6), TaskStatus::Completed, 30, created),
        ];
        assert_eq!(streak(&tasks, today), 2);
    }

    #[test]
    fn test_streak_incomplete_today_starts_at_yesterday() {
        let today = date(2026, 8, 6);
        let created = ts("2026-08-01T08:00:00Z");
        let tasks = vec![
            task_on(date(2026, 8, 5), TaskStatus::Completed, 30, created),
            task_on(today, TaskStatus::Completed, 20, created),
            task_on(today, TaskStatus::Pending, 20, created),
        ];
        // Today is mixed, so it neither counts nor breaks the run.
        assert_eq!(streak(&tasks, today), 1);
    }

    #[test]
    fn test_streak_no_tasks_is_zero() {
        assert_eq!(streak(&[], date(2026, 8, 6)), 0);
    }

    #[test]
    fn test_weekly_rate_no_recent_tasks_is_zero() {
        let now = ts("2026-08-06T12:00:00Z");
        let old = ts("2026-07-01T12:00:00Z");
        let tasks = vec![task_on(date(2026, 7, 1), TaskStatus::Completed, 30, old)];
        assert_eq!(weekly_rate(&tasks, now), 0);
        assert_eq!(weekly_rate(&[], now), 0);
    }

    #[test]
    fn test_weekly_rate_rounds_to_nearest() {
        let now = ts("2026-08-06T12:00:00Z");
        let recent = ts("2026-08-05T12:00:00Z");
        let tasks = vec![
            task_on(date(2026, 8, 5), TaskStatus::Completed, 30, recent),
            task_on(date(2026, 8, 5), TaskStatus::Completed, 30, recent),
            task_on(date(2026, 8, 6), TaskStatus::Pending, 30, recent),
        ];
        // 2/3 rounds to 67
        assert_eq!(weekly_rate(&tasks, now), 67);
    }

    #[test]
    fn test_weekly_rate_keys_on_creation_not_date() {
        let now = ts("2026-08-06T12:00:00Z");
        let recent = ts("2026-08-05T12:00:00Z");
        // Dated far in the past but created yesterday: still counts.
        let tasks = vec![task_on(date(2026, 7, 1), TaskStatus::Completed, 30, recent)];
        assert_eq!(weekly_rate(&tasks, now), 100);
    }

    #[test]
    fn test_missed_days_excludes_today() {
        let today = date(2026, 8, 6);
        let created = ts("2026-08-01T08:00:00Z");
        let tasks = vec![
            task_on(date(2026, 8, 4), TaskStatus::Skipped, 30, created),
            task_on(date(2026, 8, 5), TaskStatus::Completed, 30, created),
            task_on(today, TaskStatus::Pending, 30, created),
        ];
        // Aug 4 missed; today's pending task does not count.
        assert_eq!(missed_days(&tasks, today), 1);
    }

    #[test]
    fn test_average_focus_zero_completed() {
        let created = ts("2026-08-01T08:00:00Z");
        let tasks = vec![task_on(date(2026, 8, 5), TaskStatus::Pending, 45, created)];
        assert_eq!(average_focus(&tasks), "0m");
        assert_eq!(average_focus(&[]), "0m");
    }

    #[test]
    fn test_average_focus_rounds_per_day() {
        let created = ts("2026-08-01T08:00:00Z");
        let tasks = vec![
            task_on(date(2026, 8, 4), TaskStatus::Completed, 20, created),
            task_on(date(2026, 8, 4), TaskStatus::Completed, 25, created),
            task_on(date(2026, 8, 5), TaskStatus::Completed, 30, created),
        ];
        // 75 minutes over 2 completed days
        assert_eq!(average_focus(&tasks), "38m");
    }

    #[test]
    fn test_day_status_variants() {
        let today = date(2026, 8, 6);
        let created = ts("2026-08-06T08:00:00Z");

        assert_eq!(day_status(&[], today), DayStatus::NotStarted);

        let mixed = vec![
            task_on(today, TaskStatus::Completed, 30, created),
            task_on(today, TaskStatus::Pending, 30, created),
        ];
        assert_eq!(day_status(&mixed, today), DayStatus::InProgress);

        let done = vec![task_on(today, TaskStatus::Completed, 30, created)];
        assert_eq!(day_status(&done, today), DayStatus::Completed);
    }

    #[test]
    fn test_progress_percentage_guards_zero_days() {
        assert_eq!(progress_percentage(3, 0), 0);
        assert_eq!(progress_percentage(3, 30), 10);
        assert_eq!(progress_percentage(40, 30), 100);
    }

    #[test]
    fn test_progress_report_three_day_scenario() {
        let created = ts("2026-08-04T06:00:00Z");
        let now = ts("2026-08-06T12:00:00Z");
        let today = date(2026, 8, 6);
        let goal = goal_with(
            created,
            30,
            vec![
                Phase {
                    name: "Kickoff".to_string(),
                    weeks: [1, 1],
                    focus: String::new(),
                },
                Phase {
                    name: "Momentum".to_string(),
                    weeks: [2, 3],
                    focus: String::new(),
                },
            ],
        );
        let tasks = vec![
            task_on(date(2026, 8, 4), TaskStatus::Completed, 30, created),
            task_on(date(2026, 8, 5), TaskStatus::Completed, 40, created),
            task_on(today, TaskStatus::Pending, 30, created),
        ];

        let report = ProgressReport::compute(&goal, &tasks, now, today, "Operational");
        assert_eq!(report.day_number, 3);
        assert_eq!(report.week, 1);
        assert_eq!(report.phase, "Kickoff");
        assert_eq!(report.streak, 2);
        assert_eq!(report.days_completed, 2);
        assert_eq!(report.progress_percentage, 7);
        assert_eq!(report.average_focus, "35m");
        assert_eq!(report.today_status, DayStatus::InProgress);
        assert_eq!(report.yesterday_status, DayStatus::Completed);
    }

    #[test]
    fn test_stats_report_window_and_missed_yesterday() {
        let today = date(2026, 8, 6);
        let created = ts("2026-08-01T08:00:00Z");
        let tasks = vec![
            task_on(date(2026, 8, 5), TaskStatus::Pending, 30, created),
            task_on(date(2026, 8, 5), TaskStatus::Completed, 30, created),
            task_on(today, TaskStatus::Completed, 30, created),
        ];

        let report = StatsReport::compute(&tasks, today);
        assert_eq!(report.history.len(), 7);
        assert_eq!(report.history[6].date, today);
        assert_eq!(report.history[6].completed, 1);
        assert_eq!(report.history[5].total, 2);
        assert!(report.missed_yesterday);
        assert_eq!(report.total_completed, 2);
        // Today fully complete, yesterday mixed: streak is exactly 1.
        assert_eq!(report.streak, 1);
    }
}
