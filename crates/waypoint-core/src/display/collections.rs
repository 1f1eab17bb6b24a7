//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{GoalSummary, Task};

/// Newtype wrapper for displaying collections of goal summaries.
///
/// Handles empty collections gracefully and keeps title handling with the
/// caller.
pub struct GoalSummaries(pub Vec<GoalSummary>);

impl GoalSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of goal summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the goal summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, GoalSummary> {
        self.0.iter()
    }
}

impl Index<usize> for GoalSummaries {
    type Output = GoalSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl fmt::Display for GoalSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No goals yet. Create one with `wp goal new`.");
        }
        for summary in &self.0 {
            writeln!(f, "{summary}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a flat task list.
pub struct Tasks(pub Vec<Task>);

impl Tasks {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of tasks in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Tasks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        for task in &self.0 {
            writeln!(
                f,
                "- [{}] {} - {} ({}m)",
                task.id,
                task.status.with_icon(),
                task.title,
                task.time
            )?;
        }
        Ok(())
    }
}
