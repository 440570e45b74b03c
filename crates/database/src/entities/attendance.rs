//! Attendance entity definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Attendance record as stored.
///
/// Records are written by clients outside this backend, so every field other
/// than the id is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attendance {
    pub id: String,
    pub student_id: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub session_id: Option<String>,
    pub created_at: String,
}

/// Fields of a newly created attendance record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAttendance {
    pub id: String,
    pub student_id: Option<String>,
    pub status: Option<String>,
    pub session_id: Option<String>,
}

/// Attendance status; unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    Absent,
    Present,
    Late,
    Excused,
    Other(String),
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Present => "present",
            AttendanceStatus::Late => "late",
            AttendanceStatus::Excused => "excused",
            AttendanceStatus::Other(raw) => raw,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, AttendanceStatus::Absent)
    }
}

impl From<&str> for AttendanceStatus {
    fn from(s: &str) -> Self {
        match s {
            "absent" => AttendanceStatus::Absent,
            "present" => AttendanceStatus::Present,
            "late" => AttendanceStatus::Late,
            "excused" => AttendanceStatus::Excused,
            other => AttendanceStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
