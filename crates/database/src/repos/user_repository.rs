//! User repository for database operations.

use crate::entities::User;
use crate::types::DatabaseResult;
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Repository for the `users` collection
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, id: &str) -> DatabaseResult<Option<User>> {
        let row = sqlx::query("SELECT id, fcm_token, created_at, updated_at FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| Self::map_row(&row)).transpose()
    }

    /// Create the user or replace its push token
    pub async fn upsert(&self, id: &str, fcm_token: Option<&str>) -> DatabaseResult<User> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO users (id, fcm_token, created_at, updated_at) VALUES (?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET fcm_token = excluded.fcm_token, updated_at = excluded.updated_at",
        )
        .bind(id)
        .bind(fcm_token)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id).await?.ok_or_else(|| {
            crate::DatabaseError::QueryError(format!("user {id} missing after upsert"))
        })
    }

    pub async fn list(&self) -> DatabaseResult<Vec<User>> {
        let rows = sqlx::query(
            "SELECT id, fcm_token, created_at, updated_at FROM users ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    fn map_row(row: &SqliteRow) -> DatabaseResult<User> {
        Ok(User {
            id: row.try_get("id")?,
            fcm_token: row.try_get("fcm_token")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
