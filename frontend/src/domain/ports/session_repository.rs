//! Port for the persisted sign-in session.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::AuthSession;

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionRepositoryError {
        /// The store could not be read.
        Read { message: String } => "session store read failed: {message}",
        /// The stored session did not parse.
        Corrupt { message: String } => "stored session is corrupt: {message}",
        /// The store could not be written.
        Write { message: String } => "session store write failed: {message}",
    }
}

/// Load, save and clear the signed-in session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stored session, if any.
    async fn load(&self) -> Result<Option<AuthSession>, SessionRepositoryError>;

    /// Replace the stored session.
    async fn save(&self, session: &AuthSession) -> Result<(), SessionRepositoryError>;

    /// Remove the stored session.
    async fn clear(&self) -> Result<(), SessionRepositoryError>;
}

/// Session store held in memory, for commands that must not touch disk.
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    session: Mutex<Option<AuthSession>>,
}

impl InMemorySessionRepository {
    /// Store pre-populated with `session`.
    #[must_use]
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<AuthSession>>, SessionRepositoryError> {
        self.session
            .lock()
            .map_err(|_| SessionRepositoryError::read("session lock poisoned"))
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn load(&self) -> Result<Option<AuthSession>, SessionRepositoryError> {
        Ok(self.slot()?.clone())
    }

    async fn save(&self, session: &AuthSession) -> Result<(), SessionRepositoryError> {
        *self.slot()? = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionRepositoryError> {
        *self.slot()? = None;
        Ok(())
    }
}
