//! Builder for creating and configuring Tracker instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Tracker;
use crate::{
    db::Database,
    error::{Result, TrackerError},
    gateway::{CredentialPool, Gateway, ModelClient},
};

/// Environment variable family holding API credentials:
/// `WAYPOINT_API_KEY`, `WAYPOINT_API_KEY_2`, ...
pub const API_KEY_ENV: &str = "WAYPOINT_API_KEY";

/// Builder for creating and configuring Tracker instances.
#[derive(Debug, Clone, Default)]
pub struct TrackerBuilder {
    database_path: Option<PathBuf>,
    credentials: Option<Vec<String>>,
    model: Option<String>,
}

impl TrackerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/waypoint/waypoint.db` or
    /// `~/.local/share/waypoint/waypoint.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the credential list explicitly instead of reading the
    /// `WAYPOINT_API_KEY` environment family.
    ///
    /// An empty list is valid: every generation call then resolves to its
    /// fallback payload, which keeps the tracker usable offline.
    pub fn with_credentials(mut self, credentials: Vec<String>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Overrides the model name used for generation calls.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Builds the configured tracker instance.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::FileSystem` if the database path is invalid
    /// Returns `TrackerError::Database` if database initialization fails
    pub async fn build(self) -> Result<Tracker> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TrackerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), TrackerError>(())
        })
        .await
        .map_err(|e| TrackerError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        let pool = match self.credentials {
            Some(keys) => CredentialPool::new(keys),
            None => CredentialPool::from_env(API_KEY_ENV),
        };
        let client = match self.model {
            Some(model) => ModelClient::with_model(model),
            None => ModelClient::new(),
        };

        Ok(Tracker::new(db_path, Gateway::new(pool, client)))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("waypoint")
            .place_data_file("waypoint.db")
            .map_err(|e| TrackerError::XdgDirectory(e.to_string()))
    }
}
