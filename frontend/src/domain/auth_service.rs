//! Sign-in, registration and sign-out.

use std::sync::Arc;

use tracing::{info, warn};

use super::ports::{AuthApi, SessionRepository, SessionRepositoryError};
use super::service_support::api_failure;
use super::{AppContext, AuthSession, Error, LoginCredentials, Registration, User};

fn map_session_error(error: SessionRepositoryError) -> Error {
    Error::internal(error.to_string())
}

/// Authenticates against the backend and keeps the session store in step
/// with the [`AppContext`].
#[derive(Clone)]
pub struct AuthService<A, S> {
    api: Arc<A>,
    sessions: Arc<S>,
}

impl<A, S> AuthService<A, S> {
    /// Create the service from its ports.
    pub fn new(api: Arc<A>, sessions: Arc<S>) -> Self {
        Self { api, sessions }
    }
}

impl<A, S> AuthService<A, S>
where
    A: AuthApi,
    S: SessionRepository,
{
    /// Sign in and persist the session.
    ///
    /// # Errors
    ///
    /// Fails when the backend rejects the credentials or the session cannot
    /// be stored; `ctx` is unchanged in both cases.
    pub async fn login(
        &self,
        ctx: &mut AppContext,
        credentials: &LoginCredentials,
    ) -> Result<User, Error> {
        let session = self
            .api
            .login(credentials)
            .await
            .map_err(api_failure("login", "Invalid email or password."))?;
        self.establish(ctx, session).await
    }

    /// Register a new account and sign it in.
    ///
    /// # Errors
    ///
    /// Fails when the backend rejects the registration or the session cannot
    /// be stored.
    pub async fn register(
        &self,
        ctx: &mut AppContext,
        registration: &Registration,
    ) -> Result<User, Error> {
        let session = self
            .api
            .register(registration)
            .await
            .map_err(api_failure("register", "Registration failed."))?;
        self.establish(ctx, session).await
    }

    /// Sign out and forget the stored session.
    ///
    /// # Errors
    ///
    /// Fails when the stored session cannot be removed. `ctx` is signed out
    /// regardless.
    pub async fn logout(&self, ctx: &mut AppContext) -> Result<(), Error> {
        ctx.sign_out();
        self.sessions.clear().await.map_err(|err| {
            warn!(error = %err, "failed to clear stored session");
            map_session_error(err)
        })
    }

    async fn establish(&self, ctx: &mut AppContext, session: AuthSession) -> Result<User, Error> {
        self.sessions
            .save(&session)
            .await
            .map_err(map_session_error)?;
        let user = session.user().clone();
        info!(user_id = %user.id, role = %user.role, "signed in");
        ctx.sign_in(session);
        Ok(user)
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
