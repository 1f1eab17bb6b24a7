//! Database operations and SQLite management for goals and tasks.
//!
//! This module provides low-level database operations for the Waypoint
//! goal tracking system. It handles SQLite database connections, schema
//! management, and provides specialized query interfaces for profiles,
//! goals, and tasks.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod goal_queries;
pub mod migrations;
pub mod profile_queries;
pub mod task_queries;

pub use task_queries::TaskSpec;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
