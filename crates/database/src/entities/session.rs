//! Session entity definitions

use serde::{Deserialize, Serialize};

/// A class session students check into with a one-time code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub code: Option<String>,
    pub created_at: String,
}

impl Session {
    /// Exact, case-sensitive comparison against the stored code.
    ///
    /// A session without a code never matches.
    pub fn code_matches(&self, candidate: &str) -> bool {
        self.code.as_deref() == Some(candidate)
    }
}
