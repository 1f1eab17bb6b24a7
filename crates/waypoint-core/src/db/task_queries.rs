//! Task CRUD operations and queries.

use jiff::{civil::Date, Timestamp};
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    gateway::MissionTask,
    models::{PlanTask, Task, TaskFilter, TaskStatus},
};

const INSERT_TASK_SQL: &str = "INSERT INTO tasks (goal_id, title, status, time, kind, \
     difficulty, day_number, date, created_at, updated_at) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const TASK_COLUMNS: &str =
    "id, goal_id, title, status, time, kind, difficulty, day_number, date, created_at, updated_at";
const UPDATE_TASK_STATUS_SQL: &str =
    "UPDATE tasks SET status = ?1, updated_at = ?2 WHERE id = ?3";
const BUMP_TOTAL_TASKS_SQL: &str =
    "UPDATE goals SET total_tasks = total_tasks + ?1, updated_at = ?2 WHERE id = ?3";
const RECOUNT_COMPLETED_SQL: &str = "UPDATE goals SET completed_tasks = \
     (SELECT COUNT(*) FROM tasks WHERE goal_id = ?1 AND status = 'completed'), \
     updated_at = ?2 WHERE id = ?1";

/// Field set for creating one task, independent of where it came from
/// (the initial plan or a generated daily mission).
#[derive(Debug, Clone)]
pub struct TaskSpec {
    /// Task title
    pub title: String,
    /// Time estimate in minutes
    pub time: u32,
    /// Kind of work
    pub kind: Option<String>,
    /// Difficulty tag
    pub difficulty: Option<String>,
}

impl From<&PlanTask> for TaskSpec {
    fn from(task: &PlanTask) -> Self {
        Self {
            title: task.title.clone(),
            time: task.time,
            kind: Some("Practice".to_string()),
            difficulty: Some("Easy".to_string()),
        }
    }
}

impl From<&MissionTask> for TaskSpec {
    fn from(task: &MissionTask) -> Self {
        Self {
            title: task.title.clone(),
            time: task.time,
            kind: task.kind.clone().or_else(|| Some("Action".to_string())),
            difficulty: task
                .difficulty
                .clone()
                .or_else(|| Some("Medium".to_string())),
        }
    }
}

fn task_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    let status_str: String = row.get(3)?;
    let status = status_str.parse::<TaskStatus>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            3,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Invalid task status: {status_str}"),
            )),
        )
    })?;

    Ok(Task {
        id: row.get::<_, i64>(0)? as u64,
        goal_id: row.get::<_, i64>(1)? as u64,
        title: row.get(2)?,
        status,
        time: row.get::<_, i64>(4)? as u32,
        kind: row.get(5)?,
        difficulty: row.get(6)?,
        day_number: row.get::<_, i64>(7)? as u32,
        date: row.get::<_, String>(8)?.parse::<Date>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(e))
        })?,
        created_at: row.get::<_, String>(9)?.parse::<Timestamp>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e))
        })?,
        updated_at: row.get::<_, String>(10)?.parse::<Timestamp>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(10, Type::Text, Box::new(e))
        })?,
    })
}

impl super::Database {
    /// Inserts a batch of pending tasks for one goal on one calendar day
    /// and bumps the goal's total-task counter in the same transaction.
    pub fn insert_tasks(
        &mut self,
        goal_id: u64,
        day_number: u32,
        date: Date,
        specs: &[TaskSpec],
    ) -> Result<Vec<Task>> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();
        let date_str = date.to_string();

        let mut tasks = Vec::with_capacity(specs.len());
        for spec in specs {
            tx.execute(
                INSERT_TASK_SQL,
                params![
                    goal_id as i64,
                    &spec.title,
                    TaskStatus::Pending.as_str(),
                    spec.time as i64,
                    &spec.kind,
                    &spec.difficulty,
                    day_number as i64,
                    &date_str,
                    &now_str,
                    &now_str,
                ],
            )
            .map_err(|e| TrackerError::database_error("Failed to insert task", e))?;

            tasks.push(Task {
                id: tx.last_insert_rowid() as u64,
                goal_id,
                title: spec.title.clone(),
                status: TaskStatus::Pending,
                time: spec.time,
                kind: spec.kind.clone(),
                difficulty: spec.difficulty.clone(),
                day_number,
                date,
                created_at: now,
                updated_at: now,
            });
        }

        if !specs.is_empty() {
            tx.execute(
                BUMP_TOTAL_TASKS_SQL,
                params![specs.len() as i64, &now_str, goal_id as i64],
            )
            .map_err(|e| TrackerError::database_error("Failed to update task counter", e))?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(tasks)
    }

    /// Retrieves a task by its ID.
    pub fn get_task(&self, id: u64) -> Result<Option<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
        self.connection
            .query_row(&sql, params![id as i64], task_from_row)
            .optional()
            .map_err(|e| TrackerError::database_error("Failed to query task", e))
    }

    /// Retrieves all tasks belonging to a goal, oldest date first.
    pub fn get_tasks(&self, goal_id: u64) -> Result<Vec<Task>> {
        self.list_tasks(&TaskFilter {
            goal_id: Some(goal_id),
            ..Default::default()
        })
    }

    /// Lists tasks matching the filter, ordered by date then ID.
    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut query = format!("SELECT {TASK_COLUMNS} FROM tasks");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(goal_id) = filter.goal_id {
            conditions.push("goal_id = ?");
            params_vec.push(Box::new(goal_id as i64));
        }

        if let Some(date) = filter.date {
            conditions.push("date = ?");
            params_vec.push(Box::new(date.to_string()));
        }

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str().to_string()));
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY date ASC, id ASC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let tasks = stmt
            .query_map(&params_refs[..], task_from_row)
            .map_err(|e| TrackerError::database_error("Failed to query tasks", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch tasks", e));
        tasks
    }

    /// Retrieves every task under any of the profile's goals.
    pub fn tasks_for_profile(&self, profile_id: u64) -> Result<Vec<Task>> {
        const SQL: &str = "SELECT t.id, t.goal_id, t.title, t.status, t.time, t.kind, \
             t.difficulty, t.day_number, t.date, t.created_at, t.updated_at \
             FROM tasks t JOIN goals g ON g.id = t.goal_id \
             WHERE g.profile_id = ?1 ORDER BY t.date ASC, t.id ASC";

        let mut stmt = self
            .connection
            .prepare(SQL)
            .map_err(|e| TrackerError::database_error("Failed to prepare query", e))?;

        let tasks = stmt
            .query_map(params![profile_id as i64], task_from_row)
            .map_err(|e| TrackerError::database_error("Failed to query profile tasks", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::database_error("Failed to fetch profile tasks", e));
        tasks
    }

    /// Transitions a task to a terminal status and refreshes the owning
    /// goal's completed-task counter in the same transaction.
    ///
    /// Terminal statuses never transition again; attempting to do so is
    /// an input error.
    pub fn update_task_status(&mut self, id: u64, status: TaskStatus) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
        let task = tx
            .query_row(&sql, params![id as i64], task_from_row)
            .optional()
            .map_err(|e| TrackerError::database_error("Failed to query task", e))?
            .ok_or(TrackerError::TaskNotFound { id })?;

        if task.status.is_terminal() {
            return Err(TrackerError::invalid_input(
                "status",
                format!(
                    "Task {} is already {} and cannot change status",
                    id,
                    task.status.as_str()
                ),
            ));
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            UPDATE_TASK_STATUS_SQL,
            params![status.as_str(), &now_str, id as i64],
        )
        .map_err(|e| TrackerError::database_error("Failed to update task status", e))?;

        tx.execute(
            RECOUNT_COMPLETED_SQL,
            params![task.goal_id as i64, &now_str],
        )
        .map_err(|e| TrackerError::database_error("Failed to refresh goal counters", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Task {
            status,
            updated_at: now,
            ..task
        })
    }
}
