//! Explicit application context and the page gate.
//!
//! The context replaces a global auth store: commands receive it, services
//! read the signed-in user from it, and it starts [`SessionState::Unhydrated`]
//! until [`AppContext::hydrate`] has read the persisted session.

use tracing::warn;

use super::access::{Capability, can};
use super::ports::SessionRepository;
use super::{AuthSession, Route, User};

/// Where the context stands with respect to the persisted session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// The persisted session has not been read yet.
    #[default]
    Unhydrated,
    /// No session is stored.
    Anonymous,
    /// A user is signed in.
    SignedIn(AuthSession),
}

/// Per-command application state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppContext {
    state: SessionState,
}

impl AppContext {
    /// Unhydrated context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrated context holding `session`.
    #[must_use]
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            state: SessionState::SignedIn(session),
        }
    }

    /// Hydrated context with nobody signed in.
    #[must_use]
    pub fn anonymous() -> Self {
        Self {
            state: SessionState::Anonymous,
        }
    }

    /// Read the persisted session. An unreadable store counts as signed out.
    pub async fn hydrate<R>(&mut self, sessions: &R)
    where
        R: SessionRepository + ?Sized,
    {
        self.state = match sessions.load().await {
            Ok(Some(session)) => SessionState::SignedIn(session),
            Ok(None) => SessionState::Anonymous,
            Err(err) => {
                warn!(error = %err, "ignoring unreadable stored session");
                SessionState::Anonymous
            }
        };
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether [`AppContext::hydrate`] has completed.
    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        !matches!(self.state, SessionState::Unhydrated)
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        matches!(self.state, SessionState::SignedIn(_))
    }

    /// Signed-in session.
    #[must_use]
    pub fn session(&self) -> Option<&AuthSession> {
        match &self.state {
            SessionState::SignedIn(session) => Some(session),
            _ => None,
        }
    }

    /// Signed-in user.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session().map(AuthSession::user)
    }

    /// Bearer token of the signed-in user.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session().map(AuthSession::token)
    }

    /// Whether the signed-in user holds `capability`.
    #[must_use]
    pub fn can(&self, capability: Capability<'_>) -> bool {
        can(self.user(), capability)
    }

    /// Record a successful sign-in.
    pub fn sign_in(&mut self, session: AuthSession) {
        self.state = SessionState::SignedIn(session);
    }

    /// Forget the signed-in user.
    pub fn sign_out(&mut self) {
        self.state = SessionState::Anonymous;
    }
}

/// Outcome of checking whether a page may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The session is still loading; show nothing and do not redirect.
    Pending,
    /// Nobody is signed in; go to `/login`.
    RedirectToLogin,
    /// Signed in without access; show the message instead of the page.
    Denied(&'static str),
    /// Render the page.
    Render,
}

/// Decides whether a page may render for the current context.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthGate;

impl AuthGate {
    /// Check `route` against `ctx`.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::{AppContext, AuthGate, GateDecision, Route};
    ///
    /// assert_eq!(AuthGate::check(&AppContext::new(), Route::Projects), GateDecision::Pending);
    /// assert_eq!(
    ///     AuthGate::check(&AppContext::anonymous(), Route::Projects),
    ///     GateDecision::RedirectToLogin
    /// );
    /// ```
    #[must_use]
    pub fn check(ctx: &AppContext, route: Route) -> GateDecision {
        if !ctx.is_hydrated() {
            return GateDecision::Pending;
        }
        if route == Route::Login {
            return GateDecision::Render;
        }
        if !ctx.is_signed_in() {
            return GateDecision::RedirectToLogin;
        }
        if ctx.can(Capability::ViewRoute(route)) {
            GateDecision::Render
        } else {
            GateDecision::Denied(route.denial_message())
        }
    }
}
