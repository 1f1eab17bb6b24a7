//! Display implementations for domain models and derived views.
//!
//! All output is markdown, rendered by the CLI's terminal renderer.
//! Models format themselves standalone; contextual variants (lists,
//! operation results) live in the sibling wrapper modules.

use std::fmt;

use super::datetime::{CalendarDay, LocalDateTime};
use crate::analytics::{ProgressReport, StatsReport};
use crate::gateway::NotificationCopy;
use crate::models::{Goal, GoalSummary, Task};
use crate::tracker::{DashboardView, TodayMission};

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;
        writeln!(
            f,
            "**Status:** {}",
            if self.is_active { "Active" } else { "Paused" }
        )?;
        if let Some(ref goal_type) = self.goal_type {
            writeln!(f, "**Type:** {goal_type}")?;
        }
        writeln!(f, "**Duration:** {} days", self.total_days)?;
        if let Some(ref target) = self.target_date {
            writeln!(f, "**Target date:** {target}")?;
        }
        writeln!(f, "**Created:** {}", LocalDateTime(&self.created_at))?;

        if let Some(ref description) = self.description {
            writeln!(f)?;
            writeln!(f, "{description}")?;
        }

        if let Some(ref summary) = self.summary {
            if !summary.is_empty() {
                writeln!(f)?;
                writeln!(f, "## Mission summary")?;
                writeln!(f)?;
                writeln!(f, "{summary}")?;
            }
        }

        if !self.phases.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Phases")?;
            writeln!(f)?;
            for phase in &self.phases {
                writeln!(
                    f,
                    "- **{}** (weeks {}-{}): {}",
                    phase.name, phase.weeks[0], phase.weeks[1], phase.focus
                )?;
            }
        }

        if !self.tasks.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Tasks")?;
            writeln!(f)?;
            for task in &self.tasks {
                writeln!(
                    f,
                    "- [{}] {} - {} ({}m, day {})",
                    task.id,
                    task.status.with_icon(),
                    task.title,
                    task.time,
                    task.day_number
                )?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;
        writeln!(f, "**Status:** {}", self.status.with_icon())?;
        writeln!(f, "**Scheduled:** {} (day {})", CalendarDay(&self.date), self.day_number)?;
        writeln!(f, "**Estimate:** {}m", self.time)?;
        if let Some(ref kind) = self.kind {
            writeln!(f, "**Kind:** {kind}")?;
        }
        if let Some(ref difficulty) = self.difficulty {
            writeln!(f, "**Difficulty:** {difficulty}")?;
        }
        Ok(())
    }
}

impl fmt::Display for GoalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_active { "●" } else { "○" };
        write!(
            f,
            "{} **{}. {}** - {}/{} tasks done, {} days",
            marker, self.id, self.title, self.completed_tasks, self.total_tasks, self.total_days
        )?;
        if let Some(ref goal_type) = self.goal_type {
            write!(f, " ({goal_type})")?;
        }
        Ok(())
    }
}

impl fmt::Display for TodayMission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Today's mission")?;
        writeln!(f)?;
        if let Some(ref focus) = self.focus {
            writeln!(f, "**Focus:** {focus}")?;
        }
        if let Some(ref habit) = self.micro_habit {
            writeln!(f, "**Micro-habit:** {habit}")?;
        }
        if self.tasks.is_empty() {
            writeln!(f, "No tasks scheduled for today.")?;
        } else {
            for task in &self.tasks {
                writeln!(
                    f,
                    "- [{}] {} - {} ({}m)",
                    task.id,
                    task.status.with_icon(),
                    task.title,
                    task.time
                )?;
            }
        }
        if let Some(ref message) = self.coach_message {
            writeln!(f)?;
            writeln!(f, "> {message}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**Day:** {} (week {}, {})", self.day_number, self.week, self.phase)?;
        writeln!(f, "**Streak:** {} days", self.streak)?;
        writeln!(f, "**Weekly completion:** {}%", self.weekly_rate)?;
        writeln!(f, "**Progress:** {}%", self.progress_percentage)?;
        writeln!(f, "**Average focus:** {} per day", self.average_focus)?;
        writeln!(f, "**Missed days:** {}", self.missed_days)
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Last 7 days")?;
        writeln!(f)?;
        for entry in &self.history {
            writeln!(
                f,
                "- {}: {}/{} completed",
                CalendarDay(&entry.date),
                entry.completed,
                entry.total
            )?;
        }
        writeln!(f)?;
        writeln!(f, "**Streak:** {} days", self.streak)?;
        writeln!(f, "**Total completed:** {}", self.total_completed)?;
        if self.missed_yesterday {
            writeln!(f, "**Heads up:** yesterday was not fully completed")?;
        }
        Ok(())
    }
}

impl fmt::Display for NotificationCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;
        writeln!(f, "{}", self.message)?;
        if !self.cta.is_empty() {
            writeln!(f)?;
            writeln!(f, "**{}**", self.cta)?;
        }
        Ok(())
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.summary.goal_title)?;
        writeln!(f)?;
        writeln!(f, "{}", self.summary.day_status_text)?;
        writeln!(f, "**{}**", self.summary.streak_text)?;
        writeln!(f)?;
        write!(f, "{}", self.report)?;
        writeln!(f)?;
        writeln!(f, "> {}", self.summary.ai_insight)?;
        writeln!(f)?;
        writeln!(f, "**Next:** {}", self.summary.primary_action)?;

        if !self.other_goals.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Other goals")?;
            writeln!(f)?;
            for goal in &self.other_goals {
                writeln!(f, "{goal}")?;
            }
        }
        Ok(())
    }
}
