use tempfile::TempDir;
use waypoint_core::TrackerBuilder;

/// Helper function to create a test tracker with no credentials, so
/// generation calls resolve to fallbacks without touching the network.
pub async fn create_test_tracker() -> (TempDir, waypoint_core::Tracker) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let tracker = TrackerBuilder::new()
        .with_database_path(Some(&db_path))
        .with_credentials(Vec::new())
        .build()
        .await
        .expect("Failed to create tracker");
    (temp_dir, tracker)
}
