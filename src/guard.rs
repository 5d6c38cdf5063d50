//! Access decision for admin routes.

use serde::Serialize;

use crate::session::SessionSnapshot;

pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum GuardDecision {
    /// Session still resolving; show a neutral placeholder
    Wait,
    Allow,
    /// Send the user to `to`, remembering where they were headed
    Redirect { to: String, from: String },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    /// Location to return to after a successful login
    pub fn return_to(&self) -> Option<&str> {
        match self {
            GuardDecision::Redirect { from, .. } => Some(from),
            _ => None,
        }
    }
}

/// Decide whether `requested` may be shown for this session
pub fn guard(session: &SessionSnapshot, requested: &str) -> GuardDecision {
    if !session.is_settled() {
        return GuardDecision::Wait;
    }
    if session.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect {
            to: LOGIN_PATH.to_string(),
            from: requested.to_string(),
        }
    }
}
