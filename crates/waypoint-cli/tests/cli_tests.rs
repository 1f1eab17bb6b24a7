use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper function to create a temporary directory for CLI tests
fn create_cli_test_environment() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Helper function to create a `wp` Command in plain-text mode with no
/// API credentials, so generation commands use their offline fallbacks
fn waypoint_cmd() -> Command {
    let mut cmd = Command::cargo_bin("wp").expect("Failed to find wp binary");
    cmd.arg("--no-color");
    cmd.env_remove("WAYPOINT_API_KEY");
    cmd.env_remove("WAYPOINT_API_KEY_2");
    cmd.env_remove("WAYPOINT_API_KEY_3");
    cmd
}

#[test]
fn test_cli_goal_new_success() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    waypoint_cmd()
        .args([
            "--database-file",
            db_path.to_str().unwrap(),
            "goal",
            "new",
            "Learn Rust",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created goal with ID: 1"))
        .stdout(predicate::str::contains("Learn Rust"));
}

#[test]
fn test_cli_goal_list_shows_created_goal() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    waypoint_cmd()
        .args(["--database-file", db_arg, "goal", "new", "Learn Rust"])
        .assert()
        .success();

    waypoint_cmd()
        .args(["--database-file", db_arg, "goal", "list", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Learn Rust"));
}

#[test]
fn test_cli_default_command_lists_goals() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    waypoint_cmd()
        .args(["--database-file", db_path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No goals yet"));
}

#[test]
fn test_cli_today_returns_day_one_tasks() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    waypoint_cmd()
        .args(["--database-file", db_arg, "goal", "new", "Learn Rust"])
        .assert()
        .success();

    waypoint_cmd()
        .args(["--database-file", db_arg, "today"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Today's mission"));
}

#[test]
fn test_cli_task_done_and_terminal_rejection() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    waypoint_cmd()
        .args(["--database-file", db_arg, "goal", "new", "Learn Rust"])
        .assert()
        .success();

    // The offline fallback plan creates exactly one day-1 task (ID 1)
    waypoint_cmd()
        .args(["--database-file", db_arg, "task", "done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked as completed"));

    // Completed is terminal: a second transition is an input error
    waypoint_cmd()
        .args(["--database-file", db_arg, "task", "skip", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already completed"));
}

#[test]
fn test_cli_stats_and_dashboard() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    waypoint_cmd()
        .args(["--database-file", db_arg, "goal", "new", "Learn Rust"])
        .assert()
        .success();
    waypoint_cmd()
        .args(["--database-file", db_arg, "task", "done", "1"])
        .assert()
        .success();

    waypoint_cmd()
        .args(["--database-file", db_arg, "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Last 7 days"))
        .stdout(predicate::str::contains("Streak:"));

    waypoint_cmd()
        .args(["--database-file", db_arg, "dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Learn Rust"))
        .stdout(predicate::str::contains("day streak"));
}

#[test]
fn test_cli_goal_activate_switches() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    waypoint_cmd()
        .args(["--database-file", db_arg, "goal", "new", "First"])
        .assert()
        .success();
    waypoint_cmd()
        .args(["--database-file", db_arg, "goal", "new", "Second"])
        .assert()
        .success();

    waypoint_cmd()
        .args(["--database-file", db_arg, "goal", "activate", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked as active goal"));

    // Only the reactivated goal shows in the default (active-only) list
    waypoint_cmd()
        .args(["--database-file", db_arg, "goal", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First"))
        .stdout(predicate::str::contains("Second").not());
}

#[test]
fn test_cli_goal_delete_and_missing_goal_message() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");
    let db_arg = db_path.to_str().unwrap();

    waypoint_cmd()
        .args(["--database-file", db_arg, "goal", "new", "Learn Rust"])
        .assert()
        .success();

    waypoint_cmd()
        .args(["--database-file", db_arg, "goal", "delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted goal 'Learn Rust'"));

    waypoint_cmd()
        .args(["--database-file", db_arg, "goal", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("not found"));
}

#[test]
fn test_cli_notify_without_goals_nudges_onboarding() {
    let temp_dir = create_cli_test_environment();
    let db_path = temp_dir.path().join("cli_test.db");

    waypoint_cmd()
        .args(["--database-file", db_path.to_str().unwrap(), "notify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Start a mission"));
}

#[test]
fn test_cli_help_shows_commands() {
    waypoint_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("goal"))
        .stdout(predicate::str::contains("today"))
        .stdout(predicate::str::contains("dashboard"));
}
