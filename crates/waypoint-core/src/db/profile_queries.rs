//! Profile queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, TrackerError},
    models::Profile,
};

const INSERT_PROFILE_SQL: &str =
    "INSERT INTO profiles (name, email, phone, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_FIRST_PROFILE_SQL: &str =
    "SELECT id, name, email, phone, created_at FROM profiles ORDER BY id LIMIT 1";

fn profile_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get::<_, i64>(0)? as u64,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        created_at: row.get::<_, String>(4)?.parse::<Timestamp>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e))
        })?,
    })
}

impl super::Database {
    /// Returns the profile owning this database file, creating it on
    /// first use. There is no authentication layer; the single local
    /// profile stands in for the authenticated user.
    pub fn ensure_profile(&mut self) -> Result<Profile> {
        if let Some(profile) = self
            .connection
            .query_row(SELECT_FIRST_PROFILE_SQL, [], profile_from_row)
            .optional()
            .db_context("Failed to query profile")?
        {
            return Ok(profile);
        }

        let name = std::env::var("USER").unwrap_or_else(|_| "pilot".to_string());
        let now = Timestamp::now();

        self.connection
            .execute(
                INSERT_PROFILE_SQL,
                params![&name, None::<String>, None::<String>, now.to_string()],
            )
            .map_err(|e| TrackerError::database_error("Failed to insert profile", e))?;

        Ok(Profile {
            id: self.connection.last_insert_rowid() as u64,
            name,
            email: None,
            phone: None,
            created_at: now,
        })
    }
}
