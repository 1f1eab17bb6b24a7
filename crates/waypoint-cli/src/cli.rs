//! Command-line interface definitions and handlers
//!
//! This module defines the subcommand structure using clap's derive API,
//! implementing the parameter wrapper pattern: each argument struct adds
//! CLI-specific attributes (flags, help text) and converts into the
//! interface-agnostic parameter types of `waypoint_core::params` via
//! `into_params()`. CLI concerns stay here; validation and business logic
//! stay in the core.

use anyhow::Result;
use clap::{Args, Subcommand};
use waypoint_core::{
    display::{CreateResult, DeleteResult, GoalSummaries, OperationStatus, UpdateResult},
    params::{CreateGoal, Id, ListGoals, Notify, TodayTasks},
    Tracker,
};

use crate::renderer::TerminalRenderer;

/// Goal management subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Generate a new goal with an AI plan and make it active
    New(CreateGoalArgs),
    /// List goals
    #[command(alias = "ls")]
    List(ListGoalsArgs),
    /// Show a goal with its plan and tasks
    Show(IdArg),
    /// Make a goal the active one
    Activate(IdArg),
    /// Permanently delete a goal and its tasks
    Delete(IdArg),
}

/// Task management subcommands
#[derive(Subcommand)]
pub enum TaskCommands {
    /// Mark a task completed
    Done(IdArg),
    /// Mark a task skipped
    Skip(IdArg),
}

/// Generate a new goal
///
/// CLI wrapper for CreateGoal that adds clap-specific argument handling.
#[derive(Args)]
pub struct CreateGoalArgs {
    /// Title of the goal
    pub title: String,
    /// Optional description providing more context about the goal
    #[arg(short, long)]
    pub description: Option<String>,
    /// Target completion date (YYYY-MM-DD); plan length derives from it
    #[arg(long)]
    pub target_date: Option<String>,
    /// Daily time commitment (e.g. "30 minutes")
    #[arg(long)]
    pub daily_time: Option<String>,
    /// Kind of goal (e.g. "Learning", "Fitness")
    #[arg(long)]
    pub goal_type: Option<String>,
    /// Skill level (Beginner, Intermediate, Advanced)
    #[arg(long)]
    pub skill_level: Option<String>,
}

impl CreateGoalArgs {
    pub fn into_params(self) -> CreateGoal {
        CreateGoal {
            title: self.title,
            description: self.description,
            target_date: self.target_date,
            daily_time: self.daily_time,
            goal_type: self.goal_type,
            skill_level: self.skill_level,
        }
    }
}

/// List goals
#[derive(Args)]
pub struct ListGoalsArgs {
    /// Show every goal instead of only the active one
    #[arg(long)]
    pub all: bool,
}

impl ListGoalsArgs {
    pub fn into_params(self) -> ListGoals {
        ListGoals { all: self.all }
    }
}

/// Operate on a resource by ID
#[derive(Args)]
pub struct IdArg {
    /// ID of the resource to operate on
    pub id: u64,
}

impl IdArg {
    pub fn into_params(self) -> Id {
        Id { id: self.id }
    }
}

/// Show today's mission
#[derive(Args)]
pub struct TodayArgs {
    /// Self-reported mood, forwarded as generation context
    #[arg(long)]
    pub mood: Option<String>,
}

impl TodayArgs {
    pub fn into_params(self) -> TodayTasks {
        TodayTasks { mood: self.mood }
    }
}

/// Generate notification copy
#[derive(Args)]
pub struct NotifyArgs {
    /// Name to address the user by
    #[arg(long)]
    pub name: Option<String>,
    /// Self-reported mood
    #[arg(long)]
    pub mood: Option<String>,
    /// Time of day the notification is for
    #[arg(long)]
    pub time_of_day: Option<String>,
}

impl NotifyArgs {
    pub fn into_params(self) -> Notify {
        Notify {
            user_name: self.name,
            mood: self.mood,
            time_of_day: self.time_of_day,
        }
    }
}

/// Command handlers bridging parsed arguments to tracker operations.
pub struct Cli {
    tracker: Tracker,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(tracker: Tracker, renderer: TerminalRenderer) -> Self {
        Self { tracker, renderer }
    }

    pub async fn handle_goal_command(&self, command: GoalCommands) -> Result<()> {
        match command {
            GoalCommands::New(args) => self.create_goal(args).await,
            GoalCommands::List(args) => self.list_goals(&args.into_params()).await,
            GoalCommands::Show(args) => self.show_goal(args).await,
            GoalCommands::Activate(args) => self.activate_goal(args).await,
            GoalCommands::Delete(args) => self.delete_goal(args).await,
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Done(args) => {
                let task = self.tracker.complete_task(&args.into_params()).await?;
                let result =
                    UpdateResult::with_changes(task, vec!["Marked as completed".to_string()]);
                self.renderer.render(&format!("{result}"))
            }
            TaskCommands::Skip(args) => {
                let task = self.tracker.skip_task(&args.into_params()).await?;
                let result =
                    UpdateResult::with_changes(task, vec!["Marked as skipped".to_string()]);
                self.renderer.render(&format!("{result}"))
            }
        }
    }

    async fn create_goal(&self, args: CreateGoalArgs) -> Result<()> {
        let goal = self.tracker.generate_goal(&args.into_params()).await?;
        self.renderer.render(&format!("{}", CreateResult::new(goal)))
    }

    pub async fn list_goals(&self, params: &ListGoals) -> Result<()> {
        let summaries = self.tracker.list_goals(params).await?;
        self.renderer
            .render(&format!("{}", GoalSummaries(summaries)))
    }

    async fn show_goal(&self, args: IdArg) -> Result<()> {
        let id = args.id;
        match self.tracker.get_goal(&args.into_params()).await? {
            Some(goal) => self.renderer.render(&format!("{goal}")),
            None => self.renderer.render(&format!(
                "{}",
                OperationStatus::failure(format!("Goal with ID {id} not found"))
            )),
        }
    }

    async fn activate_goal(&self, args: IdArg) -> Result<()> {
        let id = args.id;
        match self.tracker.activate_goal(&args.into_params()).await? {
            Some(goal) => {
                let result =
                    UpdateResult::with_changes(goal, vec!["Marked as active goal".to_string()]);
                self.renderer.render(&format!("{result}"))
            }
            None => self.renderer.render(&format!(
                "{}",
                OperationStatus::failure(format!("Goal with ID {id} not found"))
            )),
        }
    }

    async fn delete_goal(&self, args: IdArg) -> Result<()> {
        let id = args.id;
        match self.tracker.get_goal(&args.into_params()).await? {
            Some(goal) => {
                self.tracker.delete_goal(&Id { id }).await?;
                self.renderer.render(&format!("{}", DeleteResult::new(goal)))
            }
            None => self.renderer.render(&format!(
                "{}",
                OperationStatus::failure(format!("Goal with ID {id} not found"))
            )),
        }
    }

    pub async fn today(&self, args: TodayArgs) -> Result<()> {
        let mission = self.tracker.today_tasks(&args.into_params()).await?;
        self.renderer.render(&format!("{mission}"))
    }

    pub async fn stats(&self) -> Result<()> {
        let report = self.tracker.stats().await?;
        self.renderer.render(&format!("{report}"))
    }

    pub async fn dashboard(&self) -> Result<()> {
        let view = self.tracker.dashboard().await?;
        self.renderer.render(&format!("{view}"))
    }

    pub async fn notify(&self, args: NotifyArgs) -> Result<()> {
        let copy = self.tracker.notification(&args.into_params()).await?;
        self.renderer.render(&format!("{copy}"))
    }
}
