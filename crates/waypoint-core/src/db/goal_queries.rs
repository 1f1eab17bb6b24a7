//! Goal CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::{Goal, GoalFilter, GoalSummary, Phase, PlanDay, Rules},
};

// SQL queries as const strings
const INSERT_GOAL_SQL: &str = "INSERT INTO goals (profile_id, title, description, is_active, \
     target_date, daily_time, goal_type, skill_level, total_days, summary, phases, rules, \
     full_plan, total_tasks, completed_tasks, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)";
const GOAL_COLUMNS: &str = "id, profile_id, title, description, is_active, target_date, \
     daily_time, goal_type, skill_level, total_days, summary, phases, rules, full_plan, \
     total_tasks, completed_tasks, created_at, updated_at";
const CHECK_GOAL_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM goals WHERE id = ?1)";
const DEACTIVATE_GOALS_SQL: &str =
    "UPDATE goals SET is_active = 0, updated_at = ?1 WHERE profile_id = ?2 AND is_active = 1";
const ACTIVATE_GOAL_SQL: &str =
    "UPDATE goals SET is_active = 1, updated_at = ?1 WHERE id = ?2 AND profile_id = ?3";
const DELETE_GOAL_TASKS_SQL: &str = "DELETE FROM tasks WHERE goal_id = ?1";
const DELETE_GOAL_SQL: &str = "DELETE FROM goals WHERE id = ?1";

// Base query for goal listing
const SUMMARY_COLUMNS: &str =
    "id, title, goal_type, is_active, total_days, total_tasks, completed_tasks, created_at, \
     updated_at";
const GOAL_SUMMARIES_VIEW: &str = "goal_summaries";

fn parse_json_column<T: serde::de::DeserializeOwned>(
    row: &rusqlite::Row<'_>,
    index: usize,
) -> rusqlite::Result<T> {
    let raw: String = row.get(index)?;
    serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
    })
}

fn parse_timestamp_column(row: &rusqlite::Row<'_>, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

fn goal_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Goal> {
    let phases: Vec<Phase> = parse_json_column(row, 11)?;
    let rules: Rules = parse_json_column(row, 12)?;
    let full_plan: Vec<PlanDay> = parse_json_column(row, 13)?;

    Ok(Goal {
        id: row.get::<_, i64>(0)? as u64,
        profile_id: row.get::<_, i64>(1)? as u64,
        title: row.get(2)?,
        description: row.get(3)?,
        is_active: row.get(4)?,
        target_date: row.get(5)?,
        daily_time: row.get(6)?,
        goal_type: row.get(7)?,
        skill_level: row.get(8)?,
        total_days: row.get::<_, i64>(9)? as u32,
        summary: row.get(10)?,
        phases,
        rules,
        full_plan,
        total_tasks: row.get::<_, i64>(14)? as u32,
        completed_tasks: row.get::<_, i64>(15)? as u32,
        created_at: parse_timestamp_column(row, 16)?,
        updated_at: parse_timestamp_column(row, 17)?,
        tasks: Vec::new(),
    })
}

impl super::Database {
    /// Creates a new goal from a draft value (its `id` is ignored).
    ///
    /// When the draft is marked active, every other goal of the profile is
    /// deactivated in the same transaction, so a concurrent reader never
    /// observes zero active goals mid-switch.
    pub fn create_goal(&mut self, draft: &Goal) -> Result<Goal> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        if draft.is_active {
            tx.execute(
                DEACTIVATE_GOALS_SQL,
                params![&now_str, draft.profile_id as i64],
            )
            .map_err(|e| TrackerError::database_error("Failed to deactivate goals", e))?;
        }

        let phases = serde_json::to_string(&draft.phases)?;
        let rules = serde_json::to_string(&draft.rules)?;
        let full_plan = serde_json::to_string(&draft.full_plan)?;

        tx.execute(
            INSERT_GOAL_SQL,
            params![
                draft.profile_id as i64,
                &draft.title,
                &draft.description,
                draft.is_active,
                &draft.target_date,
                &draft.daily_time,
                &draft.goal_type,
                &draft.skill_level,
                draft.total_days as i64,
                &draft.summary,
                &phases,
                &rules,
                &full_plan,
                draft.total_tasks as i64,
                draft.completed_tasks as i64,
                &now_str,
                &now_str,
            ],
        )
        .map_err(|e| TrackerError::database_error("Failed to insert goal", e))?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Goal {
            id,
            created_at: now,
            updated_at: now,
            tasks: Vec::new(),
            ..draft.clone()
        })
    }

    /// Retrieves a goal by its ID with its tasks eagerly loaded.
    pub fn get_goal(&self, id: u64) -> Result<Option<Goal>> {
        let sql = format!("SELECT {GOAL_COLUMNS} FROM goals WHERE id = ?1");
        let mut goal = self
            .connection
            .query_row(&sql, params![id as i64], goal_from_row)
            .optional()
            .map_err(|e| TrackerError::database_error("Failed to query goal", e))?;

        if let Some(ref mut goal) = goal {
            goal.tasks = self.get_tasks(goal.id)?;
        }

        Ok(goal)
    }

    /// Retrieves the profile's active goal, if any, with tasks loaded.
    pub fn active_goal(&self, profile_id: u64) -> Result<Option<Goal>> {
        let sql = format!(
            "SELECT {GOAL_COLUMNS} FROM goals WHERE profile_id = ?1 AND is_active = 1 \
             ORDER BY created_at DESC LIMIT 1"
        );
        let mut goal = self
            .connection
            .query_row(&sql, params![profile_id as i64], goal_from_row)
            .optional()
            .map_err(|e| TrackerError::database_error("Failed to query active goal", e))?;

        if let Some(ref mut goal) = goal {
            goal.tasks = self.get_tasks(goal.id)?;
        }

        Ok(goal)
    }

    /// Lists goal summaries with optional filtering, newest first.
    pub fn list_summaries(&self, filter: Option<&GoalFilter>) -> Result<Vec<GoalSummary>> {
        let mut query = format!("SELECT {SUMMARY_COLUMNS} FROM {GOAL_SUMMARIES_VIEW}");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if f.active_only {
                conditions.push("is_active = 1");
            }

            if let Some(ref title) = f.title_contains {
                conditions.push("title LIKE ?");
                params_vec.push(Box::new(format!("%{title}%")));
            }

            if let Some(ref after) = f.created_after {
                conditions.push("created_at >= ?");
                params_vec.push(Box::new(after.to_string()));
            }

            if let Some(ref before) = f.created_before {
                conditions.push("created_at <= ?");
                params_vec.push(Box::new(before.to_string()));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY created_at DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let summaries = stmt
            .query_map(&params_refs[..], |row| {
                Ok(GoalSummary {
                    id: row.get::<_, i64>(0)? as u64,
                    title: row.get(1)?,
                    goal_type: row.get(2)?,
                    is_active: row.get(3)?,
                    total_days: row.get::<_, i64>(4)? as u32,
                    total_tasks: row.get::<_, i64>(5)? as u32,
                    completed_tasks: row.get::<_, i64>(6)? as u32,
                    created_at: parse_timestamp_column(row, 7)?,
                    updated_at: parse_timestamp_column(row, 8)?,
                })
            })
            .map_err(|e| TrackerError::database_error("Failed to query goals", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch goals", e))?;

        Ok(summaries)
    }

    /// Makes the given goal the profile's only active one.
    ///
    /// Both writes (deactivate-all, activate-one) share one transaction:
    /// the one-active-goal invariant holds at every commit point. Returns
    /// the activated goal, or None when it doesn't exist for this profile.
    pub fn activate_goal(&mut self, profile_id: u64, id: u64) -> Result<Option<Goal>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();
        tx.execute(DEACTIVATE_GOALS_SQL, params![&now, profile_id as i64])
            .map_err(|e| TrackerError::database_error("Failed to deactivate goals", e))?;

        let rows_affected = tx
            .execute(ACTIVATE_GOAL_SQL, params![&now, id as i64, profile_id as i64])
            .map_err(|e| TrackerError::database_error("Failed to activate goal", e))?;

        if rows_affected == 0 {
            // Unknown goal: the dropped transaction rolls back the
            // deactivation, leaving the previous active goal in place.
            return Ok(None);
        }

        let sql = format!("SELECT {GOAL_COLUMNS} FROM goals WHERE id = ?1");
        let goal = tx
            .query_row(&sql, params![id as i64], goal_from_row)
            .optional()
            .map_err(|e| TrackerError::database_error("Failed to query activated goal", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        let mut goal = goal;
        if let Some(ref mut goal) = goal {
            goal.tasks = self.get_tasks(goal.id)?;
        }

        Ok(goal)
    }

    /// Permanently deletes a goal and all its associated tasks.
    /// This operation cannot be undone.
    pub fn delete_goal(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_GOAL_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .map_err(|e| TrackerError::database_error("Failed to check goal existence", e))?;

        if !exists {
            return Err(TrackerError::GoalNotFound { id });
        }

        // Foreign key cascade covers this, but keep the delete explicit
        tx.execute(DELETE_GOAL_TASKS_SQL, params![id as i64])
            .map_err(|e| TrackerError::database_error("Failed to delete goal tasks", e))?;

        tx.execute(DELETE_GOAL_SQL, params![id as i64])
            .map_err(|e| TrackerError::database_error("Failed to delete goal", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
