//! Authentication session.
//!
//! An [`AuthSession`] is created once at startup around a shared
//! [`ApiClient`] and handed to whatever needs it. State changes are
//! published on a `watch` channel so guards can take snapshots or wait for
//! the session to settle.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::error::ClientResult;
use crate::types::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthStatus {
    /// Before the first check
    Unknown,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub status: AuthStatus,
    pub user: Option<User>,
    in_flight: usize,
}

impl SessionSnapshot {
    pub fn new(status: AuthStatus, user: Option<User>, loading: bool) -> Self {
        Self {
            status,
            user,
            in_flight: usize::from(loading),
        }
    }

    /// True while a check-auth or login call is outstanding
    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    /// Settled means a guard may act on it
    pub fn is_settled(&self) -> bool {
        !self.loading() && self.status != AuthStatus::Unknown
    }

    fn sign_out(&mut self) {
        self.status = AuthStatus::Unauthenticated;
        self.user = None;
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::new(AuthStatus::Unknown, None, false)
    }
}

pub struct AuthSession {
    client: Arc<ApiClient>,
    state: Arc<watch::Sender<SessionSnapshot>>,
}

impl AuthSession {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::default());
        let state = Arc::new(tx);

        // Any 401, whoever triggered it, ends the session
        let on_401 = state.clone();
        client.on_unauthorized(move || {
            on_401.send_modify(SessionSnapshot::sign_out);
        });

        Self { client, state }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Startup check: verify a stored token, or settle as signed out without a call
    pub async fn start(&self) -> SessionSnapshot {
        if self.client.has_token() {
            self.check().await
        } else {
            debug!("no stored token; starting unauthenticated");
            self.state.send_modify(SessionSnapshot::sign_out);
            self.snapshot()
        }
    }

    /// Validate the stored token with the backend
    pub async fn check(&self) -> SessionSnapshot {
        self.begin();
        let result = self.client.check_auth().await;

        let user = match result {
            Ok(check) if check.authenticated => check.user,
            Ok(_) => None,
            Err(e) => {
                debug!("auth check failed: {}", e);
                None
            }
        };
        if user.is_none() {
            self.client.clear_token();
        }

        self.finish(|s| match user {
            Some(user) => {
                s.status = AuthStatus::Authenticated;
                s.user = Some(user);
            }
            None => s.sign_out(),
        });
        self.snapshot()
    }

    /// Exchange credentials for a token. Failures are returned so the form can show them.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<User> {
        self.begin();
        let result = self.client.login(username, password).await;

        match result {
            Ok(response) => {
                info!("logged in as {}", response.user.username);
                let user = response.user;
                let published = user.clone();
                self.finish(move |s| {
                    s.status = AuthStatus::Authenticated;
                    s.user = Some(published);
                });
                Ok(user)
            }
            Err(e) => {
                warn!("login failed for {}: {}", username, e);
                self.client.clear_token();
                self.finish(SessionSnapshot::sign_out);
                Err(e)
            }
        }
    }

    /// Clear the token and sign out; never fails
    pub fn logout(&self) {
        self.client.logout();
        self.state.send_modify(SessionSnapshot::sign_out);
        info!("logged out");
    }

    /// Wait until no call is outstanding and the status is known
    pub async fn settled(&self) -> SessionSnapshot {
        let mut rx = self.subscribe();
        let result = rx.wait_for(SessionSnapshot::is_settled).await.map(|s| s.clone());
        // The sender lives as long as self, so the channel cannot close here
        result.unwrap_or_else(|_| self.snapshot())
    }

    fn begin(&self) {
        self.state.send_modify(|s| s.in_flight += 1);
    }

    fn finish(&self, apply: impl FnOnce(&mut SessionSnapshot)) {
        self.state.send_modify(|s| {
            s.in_flight = s.in_flight.saturating_sub(1);
            apply(s);
        });
    }
}
