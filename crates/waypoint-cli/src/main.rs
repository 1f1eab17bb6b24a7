//! Waypoint CLI Application
//!
//! Command-line interface for the Waypoint goal tracking tool.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use waypoint_core::{params::ListGoals, TrackerBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let tracker = TrackerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize tracker")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(tracker, renderer);

    info!("Waypoint started");

    match command {
        Some(Goal { command }) => cli.handle_goal_command(command).await,
        Some(Task { command }) => cli.handle_task_command(command).await,
        Some(Today(args)) => cli.today(args).await,
        Some(Stats) => cli.stats().await,
        Some(Dashboard) => cli.dashboard().await,
        Some(Notify(args)) => cli.notify(args).await,
        None => cli.list_goals(&ListGoals { all: false }).await,
    }
}
