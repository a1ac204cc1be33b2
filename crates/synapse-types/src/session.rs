//! Signed-in session context

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Proof that a user signed in. Absent at boot, set on sign-in,
/// cleared on sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user: String,
    pub signed_in_at: DateTime<Utc>,
}

impl SessionContext {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            signed_in_at: Utc::now(),
        }
    }
}
