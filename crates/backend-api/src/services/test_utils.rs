//! Test utilities for service layer testing

use attendance_config::DatabaseConfig;
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Creates a migrated test database in a temporary directory
pub async fn create_test_db() -> (SqlitePool, TempDir) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");

    let config = DatabaseConfig {
        url: format!("sqlite://{}", db_path.display()),
        max_connections: 1,
    };

    let pool = attendance_database::initialize_database(&config)
        .await
        .expect("Failed to create test database");

    (pool, temp_dir)
}
