pub mod absence;
pub mod error;
pub mod session_code;

#[cfg(test)]
pub mod test_utils;

pub use error::*;
