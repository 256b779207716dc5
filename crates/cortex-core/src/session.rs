//! Session domain model.
//!
//! A [`Session`] holds the authenticated identity and credential of the
//! running client. The invariant maintained here is that `user` is present
//! exactly when `token` is present and was last validated successfully;
//! transitions happen only through the methods below.

use crate::user::UserProfile;
use serde::{Deserialize, Serialize};

/// Authentication lifecycle phase.
///
/// `Unauthenticated -> Authenticating -> Authenticated -> (LoggingOut) -> Unauthenticated`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPhase {
    /// No credential held
    Unauthenticated,
    /// A login/register/restore call is in flight
    Authenticating,
    /// Credential validated, user profile present
    Authenticated,
    /// Teardown in progress
    LoggingOut,
}

/// The authenticated identity and credential held by the running client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token, present only while authenticated
    token: Option<String>,
    /// Profile of the signed-in user, present iff `token` was validated
    user: Option<UserProfile>,
    /// Current lifecycle phase
    phase: AuthPhase,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            token: None,
            user: None,
            phase: AuthPhase::Unauthenticated,
        }
    }
}

impl Session {
    /// Creates a new unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an authentication attempt as in flight.
    pub fn begin_auth(&mut self) {
        self.phase = AuthPhase::Authenticating;
    }

    /// Establishes an authenticated session from a validated token and profile.
    pub fn establish(&mut self, token: String, user: UserProfile) {
        self.token = Some(token);
        self.user = Some(user);
        self.phase = AuthPhase::Authenticated;
    }

    /// Marks the session as tearing down.
    pub fn begin_logout(&mut self) {
        self.phase = AuthPhase::LoggingOut;
    }

    /// Clears the session back to the unauthenticated state.
    pub fn reset(&mut self) {
        self.token = None;
        self.user = None;
        self.phase = AuthPhase::Unauthenticated;
    }

    /// Returns true while a validated credential is held.
    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated && self.token.is_some()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> AuthPhase {
        self.phase
    }

    /// The held bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The signed-in user's profile, if any.
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// Replaces the profile snapshot wholesale (e.g. after a refresh).
    ///
    /// Only valid while authenticated; ignored otherwise so a stale refresh
    /// completing after logout cannot resurrect a profile.
    pub fn replace_user(&mut self, user: UserProfile) {
        if self.is_authenticated() {
            self.user = Some(user);
        }
    }
}
