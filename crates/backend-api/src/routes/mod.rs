pub mod callable;
pub mod health;
pub mod triggers;
