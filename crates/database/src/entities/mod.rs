//! Documents read by the handlers
//!
//! Every row mirrors a document in one of the `sessions`, `users`, or
//! `attendances` collections.

pub mod attendance;
pub mod session;
pub mod user;

pub use attendance::{Attendance, AttendanceStatus, NewAttendance};
pub use session::Session;
pub use user::User;
