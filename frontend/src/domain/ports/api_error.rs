//! Error type shared by every REST API port.

use serde_json::Value;

use crate::domain::{Error, ErrorCode};

use super::define_port_error;

define_port_error! {
    /// Failures reported by REST API adapters.
    pub enum ApiError {
        /// The backend answered with a non-2xx status. `body` is the parsed
        /// JSON body, or an empty object when it did not parse.
        Status { status: u16, status_text: String, body: Value } =>
            "API Error: {status} {status_text}",
        /// No response was received.
        Transport { message: String } => "request failed: {message}",
        /// A successful response did not have the expected shape.
        Decode { message: String } => "unexpected response body: {message}",
    }
}

impl ApiError {
    /// HTTP status, when the backend answered.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// Whether the backend answered 403.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.status_code() == Some(403)
    }

    /// Parsed error body, when the backend answered.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Status { body, .. } => Some(body),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// Message to show the user: the body's `detail`, then its `title`,
    /// then `fallback`.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::ports::ApiError;
    /// use serde_json::json;
    ///
    /// let err = ApiError::status(409_u16, "Conflict", json!({"title": "Email taken"}));
    /// assert_eq!(err.user_message("Failed to create employee."), "Email taken");
    /// let err = ApiError::transport("connection refused");
    /// assert_eq!(err.user_message("Failed to create employee."), "Failed to create employee.");
    /// ```
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        let field = |name: &str| {
            self.body()
                .and_then(|body| body.get(name))
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|text| !text.is_empty())
        };
        field("detail")
            .or_else(|| field("title"))
            .unwrap_or(fallback)
            .to_owned()
    }

    /// Convert into a domain error carrying the user-facing message.
    #[must_use]
    pub fn into_domain(self, fallback: &str) -> Error {
        let message = self.user_message(fallback);
        match self {
            Self::Status { status, body, .. } => {
                let error = Error::new(ErrorCode::from_http_status(status), message);
                if body.as_object().is_some_and(|map| !map.is_empty()) {
                    error.with_details(body)
                } else {
                    error
                }
            }
            Self::Transport { message: cause } => {
                Error::service_unavailable(message).with_details(Value::String(cause))
            }
            Self::Decode { message: cause } => {
                Error::internal(message).with_details(Value::String(cause))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!({"detail": "Project not found", "title": "Not Found"}), "Project not found")]
    #[case(json!({"title": "Validation failed"}), "Validation failed")]
    #[case(json!({"detail": "  ", "title": "Bad"}), "Bad")]
    #[case(json!({"detail": 42}), "Failed to load project.")]
    #[case(json!({}), "Failed to load project.")]
    fn user_message_prefers_detail_then_title(#[case] body: Value, #[case] expected: &str) {
        let err = ApiError::status(404_u16, "Not Found", body);
        assert_eq!(err.user_message("Failed to load project."), expected);
    }

    #[rstest]
    fn display_matches_wire_convention() {
        let err = ApiError::status(500_u16, "Internal Server Error", json!({}));
        assert_eq!(err.to_string(), "API Error: 500 Internal Server Error");
    }

    #[rstest]
    fn forbidden_is_detected() {
        assert!(ApiError::status(403_u16, "Forbidden", json!({})).is_forbidden());
        assert!(!ApiError::transport("timeout").is_forbidden());
    }

    #[rstest]
    #[case(ApiError::status(403_u16, "Forbidden", json!({})), ErrorCode::Forbidden)]
    #[case(ApiError::status(404_u16, "Not Found", json!({})), ErrorCode::NotFound)]
    #[case(ApiError::transport("refused"), ErrorCode::ServiceUnavailable)]
    #[case(ApiError::decode("missing id"), ErrorCode::InternalError)]
    fn into_domain_maps_codes(#[case] err: ApiError, #[case] expected: ErrorCode) {
        let domain = err.into_domain("Failed to fetch task");
        assert_eq!(domain.code(), expected);
        assert_eq!(domain.message(), "Failed to fetch task");
    }

    #[rstest]
    fn into_domain_keeps_error_body() {
        let body = json!({"detail": "Task locked", "errors": {"title": ["required"]}});
        let domain = ApiError::status(409_u16, "Conflict", body.clone()).into_domain("x");
        assert_eq!(domain.message(), "Task locked");
        assert_eq!(domain.details(), Some(&body));
    }
}
