//! Database repository implementations

pub mod attendance_repository;
pub mod session_repository;
pub mod user_repository;

pub use attendance_repository::*;
pub use session_repository::*;
pub use user_repository::*;
