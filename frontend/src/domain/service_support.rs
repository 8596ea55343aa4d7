//! Helpers shared by the domain services.

use tracing::error;

use super::ports::ApiError;
use super::{AppContext, Capability, Error, User};

/// Message returned when a command needs a signed-in user.
pub const SIGN_IN_REQUIRED: &str = "Sign in to continue.";

/// Log a failed API call and convert it into the user-facing error.
pub(crate) fn api_failure(
    operation: &'static str,
    fallback: &'static str,
) -> impl FnOnce(ApiError) -> Error {
    move |err| {
        error!(operation, status = ?err.status_code(), error = %err, "API call failed");
        err.into_domain(fallback)
    }
}

/// Signed-in user, or an unauthorized error.
pub(crate) fn signed_in(ctx: &AppContext) -> Result<&User, Error> {
    ctx.user().ok_or_else(|| Error::unauthorized(SIGN_IN_REQUIRED))
}

/// Fail with `denied` unless the signed-in user holds `capability`.
pub(crate) fn require(
    ctx: &AppContext,
    capability: Capability<'_>,
    denied: &'static str,
) -> Result<(), Error> {
    signed_in(ctx)?;
    if ctx.can(capability) {
        Ok(())
    } else {
        Err(Error::forbidden(denied))
    }
}
