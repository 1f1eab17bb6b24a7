use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{GoalCommands, NotifyArgs, TaskCommands, TodayArgs};

/// Main command-line interface for the Waypoint goal tracking tool
///
/// Waypoint tracks goals as AI-generated multi-day plans. Each goal
/// carries dated tasks, and the tool derives day-number, phase, streak,
/// and completion metrics from the task history. Generation commands work
/// offline too: without API credentials they produce minimal built-in
/// payloads instead of failing.
#[derive(Parser)]
#[command(version, about, name = "wp")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/waypoint/waypoint.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Waypoint CLI
///
/// The CLI is organized around the goal lifecycle:
/// - `goal`: create, list, activate, and delete goals
/// - `today`: fetch (or generate) today's tasks for the active goal
/// - `task`: complete or skip individual tasks
/// - `stats` / `dashboard` / `notify`: derived views and copy
#[derive(Subcommand)]
pub enum Commands {
    /// Manage goals
    #[command(alias = "g")]
    Goal {
        #[command(subcommand)]
        command: GoalCommands,
    },
    /// Manage tasks within the active goal
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Show today's mission, generating tasks when none exist yet
    Today(TodayArgs),
    /// Show the trailing 7-day activity report
    Stats,
    /// Show the full dashboard for the active goal
    #[command(alias = "dash")]
    Dashboard,
    /// Generate one notification for the active goal
    Notify(NotifyArgs),
}
