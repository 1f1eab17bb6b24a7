//! High-level tracker API for managing goals, tasks, and insights.
//!
//! This module provides the main [`Tracker`] interface of the Waypoint
//! goal tracking system. The tracker coordinates three layers: the SQLite
//! database (via [`crate::db`]), the pure analytics computations (via
//! [`crate::analytics`]), and the AI gateway (via [`crate::gateway`]).
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │    Tracker      │───▶│    Analytics     │    │    Database     │
//! │ (goal_ops,      │    │ (pure, no I/O)   │    │   (via db/)     │
//! │  task_ops,      │    ├──────────────────┤───▶│                 │
//! │  insight_ops)   │───▶│     Gateway      │    │                 │
//! └─────────────────┘    │ (rotation +      │    └─────────────────┘
//!                        │  fallbacks)      │
//!                        └──────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Tracker`] instances with configuration
//! - [`goal_ops`]: Goal operations (generate, list, show, activate, delete)
//! - [`task_ops`]: Task operations (today's mission, complete, skip)
//! - [`insight_ops`]: Derived views (stats, dashboard, notification)
//!
//! ## Design Principles
//!
//! 1. **Async First**: blocking database work runs on the blocking pool
//! 2. **Error Propagation**: database and input errors carry context
//! 3. **Generation Never Fails**: gateway-backed operations resolve to
//!    fallback payloads rather than surfacing upstream errors
//! 4. **Per-Request Analytics**: metrics are recomputed from the records
//!    read inside the request, never cached

use std::path::PathBuf;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

use crate::gateway::Gateway;

// Module declarations
pub mod builder;
pub mod goal_ops;
pub mod insight_ops;
pub mod task_ops;


// Re-export the main types
pub use builder::TrackerBuilder;
pub use insight_ops::DashboardView;
pub use task_ops::TodayMission;

/// Main tracker interface for managing goals and tasks.
pub struct Tracker {
    pub(crate) db_path: PathBuf,
    pub(crate) gateway: Gateway,
}

impl Tracker {
    /// Creates a new tracker over a database path and gateway.
    pub(crate) fn new(db_path: PathBuf, gateway: Gateway) -> Self {
        Self { db_path, gateway }
    }
}

/// Calendar day of `now` in the system timezone.
pub(crate) fn local_date(now: Timestamp) -> Date {
    now.to_zoned(TimeZone::system()).date()
}
