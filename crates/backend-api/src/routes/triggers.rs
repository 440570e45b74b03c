use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::debug;

use crate::services::absence::{notify_absence, AttendanceCreated};
use crate::services::ServiceError;
use crate::{ApiError, AppState};

// POST /triggers/attendances/:attendance_id/created
//
// Delivery of a creation event. Any non-2xx answer tells the delivering
// runtime to retry.
pub async fn attendance_created(
    State(state): State<AppState>,
    Path(attendance_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let event = AttendanceCreated::from_body(attendance_id, &body);

    if let Some(record) = event.to_record() {
        let inserted = state
            .attendances()
            .insert_if_absent(&record)
            .await
            .map_err(ServiceError::from)?;
        if !inserted {
            debug!(attendance_id = %event.attendance_id, "attendance already stored, event redelivered");
        }
    }

    notify_absence(state.users(), state.push_sender(), &event).await?;
    Ok(StatusCode::NO_CONTENT)
}
