//! Core library for the Waypoint goal tracking application.
//!
//! This crate provides the business logic for AI-assisted goal tracking:
//! SQLite persistence for goals and their dated tasks, pure progress
//! analytics (day number, phase, streak, weekly rate), and a resilient
//! gateway around the generative-text service that produces plans, daily
//! missions, dashboard summaries, and notification copy.
//!
//! # Resilience Contract
//!
//! Generation operations never fail from the caller's point of view: the
//! gateway rotates API credentials on rate limits, extracts JSON out of
//! free-form model output, and substitutes a typed fallback payload when
//! everything else goes wrong. Errors surface only through logs.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use waypoint_core::{TrackerBuilder, params::CreateGoal};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a tracker instance (credentials come from WAYPOINT_API_KEY*)
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("waypoint.db"))
//!     .build()
//!     .await?;
//!
//! // Generate a goal with an AI plan; falls back to a minimal plan offline
//! let params = CreateGoal {
//!     title: "Learn Rust".to_string(),
//!     target_date: Some("2026-09-05".to_string()),
//!     ..Default::default()
//! };
//! let goal = tracker.generate_goal(&params).await?;
//! println!("Created goal: {}", goal);
//!
//! // Fetch (or generate) today's tasks
//! let mission = tracker.today_tasks(&Default::default()).await?;
//! println!("{}", mission);
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod db;
pub mod display;
pub mod error;
pub mod gateway;
pub mod models;
pub mod params;
pub mod tracker;

// Re-export commonly used types
pub use analytics::{ProgressReport, StatsReport};
pub use db::Database;
pub use display::{CreateResult, DeleteResult, GoalSummaries, OperationStatus, UpdateResult};
pub use error::{Result, TrackerError};
pub use gateway::{CredentialPool, Gateway, GatewayError, ModelClient};
pub use models::{
    DayStatus, Goal, GoalFilter, GoalSummary, Phase, PlanDay, PlanTask, Profile, Rules, Task,
    TaskFilter, TaskStatus,
};
pub use params::{CreateGoal, Id, ListGoals, Notify, TodayTasks, UpdateTask};
pub use tracker::{DashboardView, TodayMission, Tracker, TrackerBuilder};
