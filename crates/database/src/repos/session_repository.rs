//! Session repository for database operations.

use crate::entities::Session;
use crate::types::DatabaseResult;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Repository for the `sessions` collection
#[derive(Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find session by ID
    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<Session>> {
        let row = sqlx::query("SELECT id, code, created_at FROM sessions WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    /// Insert or replace a session and its code
    pub async fn upsert(&self, id: &str, code: Option<&str>) -> DatabaseResult<Session> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO sessions (id, code, created_at) VALUES (?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET code = excluded.code",
        )
        .bind(id)
        .bind(code)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            crate::DatabaseError::QueryError(format!("session {id} missing after upsert"))
        })
    }

    pub async fn list(&self) -> DatabaseResult<Vec<Session>> {
        let rows = sqlx::query("SELECT id, code, created_at FROM sessions ORDER BY created_at ASC, id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::map_row).collect()
    }

    fn map_row(row: &SqliteRow) -> DatabaseResult<Session> {
        Ok(Session {
            id: row.try_get("id")?,
            code: row.try_get("code")?,
            created_at: row.try_get("created_at")?,
        })
    }
}
