//! Attendance repository for database operations.

use crate::entities::{Attendance, AttendanceStatus, NewAttendance};
use crate::types::DatabaseResult;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Repository for the `attendances` collection
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: SqlitePool,
}

impl AttendanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find attendance by ID
    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Attendance>> {
        let row = sqlx::query(
            "SELECT id, student_id, status, session_id, created_at FROM attendances WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    /// Record a created attendance document.
    ///
    /// Returns `false` when a record with the same id already exists; the
    /// stored copy is left untouched.
    pub async fn insert_if_absent(&self, record: &NewAttendance) -> DatabaseResult<bool> {
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT OR IGNORE INTO attendances (id, student_id, status, session_id, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&record.id)
        .bind(&record.student_id)
        .bind(&record.status)
        .bind(&record.session_id)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn list(&self) -> DatabaseResult<Vec<Attendance>> {
        let rows = sqlx::query(
            "SELECT id, student_id, status, session_id, created_at FROM attendances
             ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    fn map_row(row: &SqliteRow) -> DatabaseResult<Attendance> {
        let status: Option<String> = row.try_get("status")?;

        Ok(Attendance {
            id: row.try_get("id")?,
            student_id: row.try_get("student_id")?,
            status: status.as_deref().map(AttendanceStatus::from),
            session_id: row.try_get("session_id")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
