//! Push notification for students marked absent.
//!
//! Runs once per created attendance document. Every precondition that does
//! not hold ends the handler quietly with [`NotifyOutcome::Skipped`].

use attendance_database::{AttendanceStatus, NewAttendance, UserRepository};
use attendance_messaging::{MessageId, PushMessage, PushSender};
use serde_json::{Map, Value};
use tracing::{debug, info};

use super::error::ServiceError;
use crate::util::non_empty_str;

pub const ABSENCE_TITLE: &str = "Absence détectée";
pub const ABSENCE_BODY: &str = "Vous avez été marqué absent à une séance.";
pub const ABSENCE_TYPE: &str = "absence";

/// A newly created `attendances/{attendanceId}` document.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceCreated {
    pub attendance_id: String,
    pub fields: Option<Map<String, Value>>,
}

impl AttendanceCreated {
    pub fn new(attendance_id: impl Into<String>, fields: Option<Map<String, Value>>) -> Self {
        Self {
            attendance_id: attendance_id.into(),
            fields,
        }
    }

    /// Decode a delivered body. Anything that is not a JSON object carries no fields.
    pub fn from_body(attendance_id: impl Into<String>, body: &[u8]) -> Self {
        let fields = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        };
        Self::new(attendance_id, fields)
    }

    /// The document's field set, if it has any.
    pub fn document(&self) -> Option<&Map<String, Value>> {
        self.fields.as_ref().filter(|fields| !fields.is_empty())
    }

    pub fn status(&self) -> Option<AttendanceStatus> {
        self.document()
            .and_then(|doc| doc.get("status"))
            .and_then(Value::as_str)
            .map(AttendanceStatus::from)
    }

    pub fn student_id(&self) -> Option<&str> {
        self.document().and_then(|doc| non_empty_str(doc, "studentId"))
    }

    /// The originating session, or `""` when the record has none.
    pub fn session_id(&self) -> &str {
        self.document()
            .and_then(|doc| doc.get("sessionId"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Row to store for this document, if it carries a field set at all.
    pub fn to_record(&self) -> Option<NewAttendance> {
        let fields = self.fields.as_ref()?;
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

        Some(NewAttendance {
            id: self.attendance_id.clone(),
            student_id: text("studentId"),
            status: text("status"),
            session_id: text("sessionId"),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyRecord,
    NotAbsent,
    MissingStudent,
    NoPushToken,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent(MessageId),
    Skipped(SkipReason),
}

pub fn absence_message(token: &str, session_id: &str) -> PushMessage {
    PushMessage::to_token(token)
        .with_notification(ABSENCE_TITLE, ABSENCE_BODY)
        .with_data("type", ABSENCE_TYPE)
        .with_data("sessionId", session_id)
}

pub async fn notify_absence(
    users: &UserRepository,
    sender: &dyn PushSender,
    event: &AttendanceCreated,
) -> Result<NotifyOutcome, ServiceError> {
    let attendance_id = event.attendance_id.as_str();

    if event.document().is_none() {
        return Ok(skip(attendance_id, SkipReason::EmptyRecord));
    }

    if !event.status().is_some_and(|status| status.is_absent()) {
        return Ok(skip(attendance_id, SkipReason::NotAbsent));
    }

    let Some(student_id) = event.student_id() else {
        return Ok(skip(attendance_id, SkipReason::MissingStudent));
    };

    let user = users.find_by_id(student_id).await?;
    let Some(token) = user.as_ref().and_then(|user| user.push_token()) else {
        return Ok(skip(attendance_id, SkipReason::NoPushToken));
    };

    let message = absence_message(token, event.session_id());
    let message_id = sender.send(&message).await?;

    info!(
        attendance_id,
        student_id,
        session_id = event.session_id(),
        %message_id,
        "absence notification sent"
    );
    Ok(NotifyOutcome::Sent(message_id))
}

fn skip(attendance_id: &str, reason: SkipReason) -> NotifyOutcome {
    debug!(attendance_id, ?reason, "absence notification skipped");
    NotifyOutcome::Skipped(reason)
}
