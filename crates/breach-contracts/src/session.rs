//! Breach session tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle passed through the minigame callback registration.
///
/// The host keeps this token while the minigame runs and hands it back to the
/// engine in the success or failure callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(pub uuid::Uuid);

impl SessionToken {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
