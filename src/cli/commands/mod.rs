pub mod auth;
pub mod projects;
pub mod show;
pub mod skills;

use crate::cli::config::record_return_to;
use crate::guard::{guard, GuardDecision};
use crate::session::AuthSession;

/// Resolve the session and let the guard decide on `location`.
/// A redirect is remembered so the next `folio auth login` can point back to it.
pub async fn require_admin(session: &AuthSession, location: &str) -> anyhow::Result<()> {
    session.start().await;
    let snapshot = session.settled().await;

    match guard(&snapshot, location) {
        GuardDecision::Allow => Ok(()),
        GuardDecision::Wait => Err(anyhow::anyhow!("session is still being checked")),
        GuardDecision::Redirect { to, from } => {
            record_return_to(&from)?;
            Err(anyhow::anyhow!(
                "{} requires login; run `folio auth login <username>` ({})",
                from,
                to
            ))
        }
    }
}
