//! Custom actions for the user store.

use crate::model::{SuspensionDuration, User};

#[derive(Debug, Clone)]
pub enum UserAction {
    /// Suspend the user, replacing any previous suspension.
    Suspend {
        duration: SuspensionDuration,
        reasons: Vec<String>,
    },
}

/// Results from UserActions - variants match 1:1 with UserAction
#[derive(Debug, Clone)]
pub enum UserActionResult {
    /// The user as stored after the suspension.
    Suspend(User),
}
