//! Persisted session envelope.
//!
//! The stored JSON is `{"state": {"token", "user", "isSignedIn"}, "version"}`.

use serde::{Deserialize, Serialize};

use crate::domain::{AuthSession, User};

pub(super) const PERSISTED_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
pub(super) struct PersistedSessionDto {
    pub(super) state: PersistedStateDto,
    #[serde(default)]
    pub(super) version: u32,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PersistedStateDto {
    #[serde(default)]
    pub(super) token: Option<String>,
    #[serde(default)]
    pub(super) user: Option<User>,
    #[serde(default)]
    pub(super) is_signed_in: bool,
}

impl PersistedSessionDto {
    pub(super) fn from_session(session: &AuthSession) -> Self {
        Self {
            state: PersistedStateDto {
                token: Some(session.token().to_owned()),
                user: Some(session.user().clone()),
                is_signed_in: true,
            },
            version: PERSISTED_VERSION,
        }
    }

    /// Signed-in session, or `None` when the entry records a signed-out
    /// state. A signed-in entry without a user is corrupt.
    pub(super) fn into_domain(self) -> Result<Option<AuthSession>, String> {
        let PersistedStateDto {
            token,
            user,
            is_signed_in,
        } = self.state;
        let Some(token) = token.filter(|value| !value.trim().is_empty()) else {
            return Ok(None);
        };
        if !is_signed_in {
            return Ok(None);
        }
        let user = user.ok_or_else(|| "signed-in session has no user".to_owned())?;
        Ok(Some(AuthSession::new(token, user)))
    }
}
