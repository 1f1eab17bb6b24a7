mod common;

use common::create_test_tracker;
use waypoint_core::{
    display::GoalSummaries,
    params::{CreateGoal, Id, ListGoals, TodayTasks},
    TaskStatus,
};

#[tokio::test]
async fn test_goal_lifecycle_end_to_end() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    // Generate (offline: fallback plan), work today's mission, check the
    // dashboard, then delete.
    let goal = tracker
        .generate_goal(&CreateGoal {
            title: "Ship a side project".to_string(),
            goal_type: Some("Building".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to generate goal");

    let mission = tracker
        .today_tasks(&TodayTasks::default())
        .await
        .expect("Failed to fetch mission");
    assert!(!mission.tasks.is_empty());

    for task in &mission.tasks {
        let done = tracker
            .complete_task(&Id { id: task.id })
            .await
            .expect("Failed to complete task");
        assert_eq!(done.status, TaskStatus::Completed);
    }

    let view = tracker.dashboard().await.expect("Failed to build dashboard");
    assert_eq!(view.goal_id, goal.id);
    assert_eq!(view.report.streak, 1);
    assert_eq!(view.report.missed_days, 0);

    tracker
        .delete_goal(&Id { id: goal.id })
        .await
        .expect("Failed to delete goal");
    let remaining = tracker
        .list_goals(&ListGoals { all: true })
        .await
        .expect("Failed to list goals");
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn test_display_output_mentions_key_facts() {
    let (_temp_dir, tracker) = create_test_tracker().await;

    let goal = tracker
        .generate_goal(&CreateGoal {
            title: "Learn Rust".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to generate goal");

    let rendered = format!("{goal}");
    assert!(rendered.contains("Learn Rust"));
    assert!(rendered.contains("**Status:** Active"));
    assert!(rendered.contains("## Tasks"));

    let summaries = tracker
        .list_goals(&ListGoals { all: true })
        .await
        .expect("Failed to list goals");
    let rendered = format!("{}", GoalSummaries(summaries));
    assert!(rendered.contains("Learn Rust"));

    let mission = tracker
        .today_tasks(&TodayTasks::default())
        .await
        .expect("Failed to fetch mission");
    let rendered = format!("{mission}");
    assert!(rendered.contains("Today's mission"));
}
