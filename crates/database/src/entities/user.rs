//! User entity definitions

use serde::{Deserialize, Serialize};

/// A student or teacher account with an optional device push token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub fcm_token: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// The registered push token, if one is on file and non-empty.
    pub fn push_token(&self) -> Option<&str> {
        self.fcm_token.as_deref().filter(|token| !token.is_empty())
    }
}
