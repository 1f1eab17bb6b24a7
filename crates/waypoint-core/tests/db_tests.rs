use jiff::Timestamp;
use tempfile::NamedTempFile;
use waypoint_core::{
    db::TaskSpec, Database, Goal, Phase, PlanDay, PlanTask, Rules, TaskStatus, TrackerError,
};

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn sample_draft(profile_id: u64, title: &str, active: bool) -> Goal {
    let now = Timestamp::now();
    Goal {
        id: 0,
        profile_id,
        title: title.to_string(),
        description: Some("Test description".to_string()),
        is_active: active,
        target_date: None,
        daily_time: Some("30 minutes".to_string()),
        goal_type: Some("Learning".to_string()),
        skill_level: Some("Beginner".to_string()),
        total_days: 14,
        summary: Some("Two focused weeks".to_string()),
        phases: vec![Phase {
            name: "Kickoff".to_string(),
            weeks: [1, 1],
            focus: "Basics".to_string(),
        }],
        rules: Rules::default(),
        full_plan: vec![PlanDay {
            day: 1,
            theme: "Setup".to_string(),
            tasks: vec![PlanTask {
                title: "Install tools".to_string(),
                time: 20,
            }],
        }],
        total_tasks: 0,
        completed_tasks: 0,
        created_at: now,
        updated_at: now,
        tasks: vec![],
    }
}

fn today() -> jiff::civil::Date {
    Timestamp::now()
        .to_zoned(jiff::tz::TimeZone::system())
        .date()
}

#[test]
fn test_database_initialization() {
    let (_temp_file, _db) = create_test_db();
    assert!(_temp_file.path().exists());
}

#[test]
fn test_ensure_profile_is_idempotent() {
    let (_temp_file, mut db) = create_test_db();

    let first = db.ensure_profile().expect("Failed to ensure profile");
    let second = db.ensure_profile().expect("Failed to ensure profile again");

    assert_eq!(first.id, second.id);
    assert_eq!(first.name, second.name);
}

#[test]
fn test_create_goal_round_trips_plan_documents() {
    let (_temp_file, mut db) = create_test_db();
    let profile = db.ensure_profile().expect("Failed to ensure profile");

    let goal = db
        .create_goal(&sample_draft(profile.id, "Learn Rust", true))
        .expect("Failed to create goal");
    assert!(goal.id > 0);

    let loaded = db
        .get_goal(goal.id)
        .expect("Failed to get goal")
        .expect("Goal should exist");

    assert_eq!(loaded.title, "Learn Rust");
    assert_eq!(loaded.phases.len(), 1);
    assert_eq!(loaded.phases[0].weeks, [1, 1]);
    assert_eq!(loaded.rules.max_tasks_per_day, 3);
    assert_eq!(loaded.full_plan[0].tasks[0].title, "Install tools");
    assert!(loaded.tasks.is_empty());
}

#[test]
fn test_create_active_goal_deactivates_previous() {
    let (_temp_file, mut db) = create_test_db();
    let profile = db.ensure_profile().expect("Failed to ensure profile");

    let first = db
        .create_goal(&sample_draft(profile.id, "First", true))
        .expect("Failed to create first goal");
    let second = db
        .create_goal(&sample_draft(profile.id, "Second", true))
        .expect("Failed to create second goal");

    let summaries = db.list_summaries(None).expect("Failed to list goals");
    assert_eq!(summaries.len(), 2);

    let active: Vec<_> = summaries.iter().filter(|g| g.is_active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, second.id);

    let first_loaded = db
        .get_goal(first.id)
        .expect("Failed to get goal")
        .expect("Goal should exist");
    assert!(!first_loaded.is_active);
}

#[test]
fn test_activate_goal_is_atomic_switch() {
    let (_temp_file, mut db) = create_test_db();
    let profile = db.ensure_profile().expect("Failed to ensure profile");

    let first = db
        .create_goal(&sample_draft(profile.id, "First", true))
        .expect("Failed to create first goal");
    db.create_goal(&sample_draft(profile.id, "Second", true))
        .expect("Failed to create second goal");

    let activated = db
        .activate_goal(profile.id, first.id)
        .expect("Failed to activate goal")
        .expect("Goal should exist");
    assert!(activated.is_active);

    // Unknown goal: the whole switch rolls back
    let missing = db
        .activate_goal(profile.id, 9999)
        .expect("Activation query should not error");
    assert!(missing.is_none());

    let active: Vec<_> = db
        .list_summaries(None)
        .expect("Failed to list goals")
        .into_iter()
        .filter(|g| g.is_active)
        .collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, first.id);
}

#[test]
fn test_insert_tasks_bumps_total_counter() {
    let (_temp_file, mut db) = create_test_db();
    let profile = db.ensure_profile().expect("Failed to ensure profile");
    let goal = db
        .create_goal(&sample_draft(profile.id, "Learn Rust", true))
        .expect("Failed to create goal");

    let specs = vec![
        TaskSpec {
            title: "Read the book".to_string(),
            time: 40,
            kind: Some("Learn".to_string()),
            difficulty: Some("Easy".to_string()),
        },
        TaskSpec {
            title: "Write a program".to_string(),
            time: 30,
            kind: Some("Practice".to_string()),
            difficulty: Some("Medium".to_string()),
        },
    ];

    let tasks = db
        .insert_tasks(goal.id, 1, today(), &specs)
        .expect("Failed to insert tasks");
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t.status == TaskStatus::Pending));

    let loaded = db
        .get_goal(goal.id)
        .expect("Failed to get goal")
        .expect("Goal should exist");
    assert_eq!(loaded.total_tasks, 2);
    assert_eq!(loaded.tasks.len(), 2);
}

#[test]
fn test_update_task_status_recounts_goal() {
    let (_temp_file, mut db) = create_test_db();
    let profile = db.ensure_profile().expect("Failed to ensure profile");
    let goal = db
        .create_goal(&sample_draft(profile.id, "Learn Rust", true))
        .expect("Failed to create goal");

    let tasks = db
        .insert_tasks(
            goal.id,
            1,
            today(),
            &[TaskSpec {
                title: "Read the book".to_string(),
                time: 40,
                kind: None,
                difficulty: None,
            }],
        )
        .expect("Failed to insert tasks");

    let updated = db
        .update_task_status(tasks[0].id, TaskStatus::Completed)
        .expect("Failed to update task");
    assert_eq!(updated.status, TaskStatus::Completed);

    let loaded = db
        .get_goal(goal.id)
        .expect("Failed to get goal")
        .expect("Goal should exist");
    assert_eq!(loaded.completed_tasks, 1);
}

#[test]
fn test_update_task_status_rejects_terminal_transitions() {
    let (_temp_file, mut db) = create_test_db();
    let profile = db.ensure_profile().expect("Failed to ensure profile");
    let goal = db
        .create_goal(&sample_draft(profile.id, "Learn Rust", true))
        .expect("Failed to create goal");

    let tasks = db
        .insert_tasks(
            goal.id,
            1,
            today(),
            &[TaskSpec {
                title: "Read the book".to_string(),
                time: 40,
                kind: None,
                difficulty: None,
            }],
        )
        .expect("Failed to insert tasks");

    db.update_task_status(tasks[0].id, TaskStatus::Skipped)
        .expect("Failed to skip task");

    let result = db.update_task_status(tasks[0].id, TaskStatus::Completed);
    assert!(matches!(result, Err(TrackerError::InvalidInput { .. })));

    let result = db.update_task_status(9999, TaskStatus::Completed);
    assert!(matches!(result, Err(TrackerError::TaskNotFound { id: 9999 })));
}

#[test]
fn test_delete_goal_removes_tasks() {
    let (_temp_file, mut db) = create_test_db();
    let profile = db.ensure_profile().expect("Failed to ensure profile");
    let goal = db
        .create_goal(&sample_draft(profile.id, "Learn Rust", true))
        .expect("Failed to create goal");

    let tasks = db
        .insert_tasks(
            goal.id,
            1,
            today(),
            &[TaskSpec {
                title: "Read the book".to_string(),
                time: 40,
                kind: None,
                difficulty: None,
            }],
        )
        .expect("Failed to insert tasks");

    db.delete_goal(goal.id).expect("Failed to delete goal");

    assert!(db
        .get_goal(goal.id)
        .expect("Failed to query goal")
        .is_none());
    assert!(db
        .get_task(tasks[0].id)
        .expect("Failed to query task")
        .is_none());

    let result = db.delete_goal(goal.id);
    assert!(matches!(result, Err(TrackerError::GoalNotFound { .. })));
}
