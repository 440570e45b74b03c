//! Attendance Database Crate
//!
//! Connection management, migrations, and read/write access to the
//! `sessions`, `users`, and `attendances` collections.

use sqlx::SqlitePool;
use attendance_config::DatabaseConfig;

pub mod connection;
pub mod entities;
pub mod migrations;
pub mod repos;
pub mod types;

pub use connection::{ping, prepare_database};
pub use migrations::{run_migrations, MIGRATOR};

pub use repos::{AttendanceRepository, SessionRepository, UserRepository};

pub use entities::{Attendance, AttendanceStatus, NewAttendance, Session, User};

pub use types::{DatabaseError, DatabaseResult};

/// Initialize the database with migrations
pub async fn initialize_database(config: &DatabaseConfig) -> DatabaseResult<SqlitePool> {
    let pool = prepare_database(config)
        .await
        .map_err(|e| DatabaseError::ConnectionError(format!("{e:#}")))?;

    run_migrations(&pool)
        .await
        .map_err(|e| DatabaseError::MigrationError(format!("{e:#}")))?;

    Ok(pool)
}
