use std::sync::Arc;

use attendance_database::{AttendanceRepository, SessionRepository, UserRepository};
use attendance_messaging::PushSender;
use sqlx::SqlitePool;

/// Shared, read-only handles cloned into every request.
#[derive(Clone)]
pub struct AppState {
    db_pool: SqlitePool,
    sessions: SessionRepository,
    users: UserRepository,
    attendances: AttendanceRepository,
    push_sender: Arc<dyn PushSender>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, push_sender: Arc<dyn PushSender>) -> Self {
        Self {
            sessions: SessionRepository::new(db_pool.clone()),
            users: UserRepository::new(db_pool.clone()),
            attendances: AttendanceRepository::new(db_pool.clone()),
            db_pool,
            push_sender,
        }
    }

    pub fn db_pool(&self) -> &SqlitePool {
        &self.db_pool
    }

    pub fn sessions(&self) -> &SessionRepository {
        &self.sessions
    }

    pub fn users(&self) -> &UserRepository {
        &self.users
    }

    pub fn attendances(&self) -> &AttendanceRepository {
        &self.attendances
    }

    pub fn push_sender(&self) -> &dyn PushSender {
        self.push_sender.as_ref()
    }
}
