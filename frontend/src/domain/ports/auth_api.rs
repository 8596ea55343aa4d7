//! Port for the `/Auth` endpoints.

use async_trait::async_trait;

use crate::domain::{AuthSession, LoginCredentials, Registration};

use super::ApiError;

/// Sign-in and self-registration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token and the signed-in user.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, ApiError>;

    /// Create an account and sign it in.
    async fn register(&self, registration: &Registration) -> Result<AuthSession, ApiError>;
}
