//! Session gate: who is signed in, if anyone.
//!
//! Credential checking is delegated to an [`Authenticator`]. The console ships
//! with [`StubAuthenticator`], which accepts any credentials; a real identity
//! service plugs in behind the same trait without touching the gate or the UI.

use uuid::Uuid;

use crate::error::Result;
use crate::models::user::{Credentials, Role, SessionUser};

/// Verifies credentials and restores existing sessions.
///
/// Calls may block; the UI runs them off the frame loop.
pub trait Authenticator: Send + Sync {
    /// Check credentials and return the signed-in user.
    fn authenticate(&self, credentials: &Credentials) -> Result<SessionUser>;

    /// Return a previously established session, if any.
    fn restore(&self) -> Option<SessionUser> {
        None
    }
}

/// Accepts any credentials.
#[derive(Debug, Clone)]
pub struct StubAuthenticator {
    role: Role,
}

impl StubAuthenticator {
    /// Users signed in through this authenticator get `role`.
    pub fn new(role: Role) -> Self {
        Self { role }
    }
}

impl Default for StubAuthenticator {
    fn default() -> Self {
        Self::new(Role::Admin)
    }
}

impl Authenticator for StubAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> Result<SessionUser> {
        let username = match credentials.username.trim() {
            "" => "admin".to_string(),
            name => name.to_string(),
        };
        Ok(SessionUser {
            id: Uuid::new_v4().to_string(),
            username,
            role: self.role,
        })
    }
}

/// Session lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Startup, before any restore attempt has answered.
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(SessionUser),
}

/// Holds the current session state.
#[derive(Debug, Default)]
pub struct SessionGate {
    state: SessionState,
}

impl SessionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading)
    }

    /// The signed-in user, or `None`.
    pub fn current_user(&self) -> Option<&SessionUser> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Leave `Loading` with the outcome of a session restore.
    ///
    /// Ignored if the gate has already left `Loading`.
    pub fn finish_loading(&mut self, restored: Option<SessionUser>) {
        if !self.is_loading() {
            return;
        }
        match restored {
            Some(user) => {
                tracing::info!(username = %user.username, "Session restored");
                self.state = SessionState::Authenticated(user);
            }
            None => {
                tracing::info!("No session to restore");
                self.state = SessionState::Unauthenticated;
            }
        }
    }

    /// Record a successful sign-in.
    pub fn sign_in(&mut self, user: SessionUser) {
        tracing::info!(username = %user.username, role = user.role.as_str(), "Signed in");
        self.state = SessionState::Authenticated(user);
    }

    /// End the session.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.current_user() {
            tracing::info!(username = %user.username, "Signed out");
        }
        self.state = SessionState::Unauthenticated;
    }
}
