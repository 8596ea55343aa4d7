//! Authentication primitives: login credentials, registration and sessions.
//!
//! Inputs are validated here so the CLI never reaches the auth port with
//! blank credentials or a password the backend would reject anyway.

use std::fmt;

use zeroize::Zeroizing;

use super::{PasswordPolicyError, User, validate_password};

/// Domain error returned when login or registration values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
    /// A required name was blank.
    EmptyName(&'static str),
    /// Registration password fails the policy.
    WeakPassword(PasswordPolicyError),
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::EmptyName(field) => write!(f, "{field} must not be empty"),
            Self::WeakPassword(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace.
///
/// # Examples
/// ```
/// use frontend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada@example.com ", "Secret1!")
///     .expect("valid credentials");
/// assert_eq!(creds.email(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Sign-in email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated self-registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    credentials: LoginCredentials,
    first_name: String,
    last_name: String,
    middle_name: Option<String>,
}

/// Raw registration form values.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationInput<'a> {
    /// Email.
    pub email: &'a str,
    /// Password.
    pub password: &'a str,
    /// Given name.
    pub first_name: &'a str,
    /// Family name.
    pub last_name: &'a str,
    /// Optional middle name; blank is treated as absent.
    pub middle_name: Option<&'a str>,
}

impl Registration {
    /// Validate registration input. The password must satisfy the policy.
    pub fn try_new(input: RegistrationInput<'_>) -> Result<Self, LoginValidationError> {
        let credentials = LoginCredentials::try_from_parts(input.email, input.password)?;
        validate_password(input.password).map_err(LoginValidationError::WeakPassword)?;
        let first_name = required_name(input.first_name, "first name")?;
        let last_name = required_name(input.last_name, "last name")?;
        let middle_name = input
            .middle_name
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        Ok(Self {
            credentials,
            first_name,
            last_name,
            middle_name,
        })
    }

    /// Email and password.
    pub fn credentials(&self) -> &LoginCredentials {
        &self.credentials
    }

    /// Given name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Family name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Middle name, if given.
    pub fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }
}

fn required_name(value: &str, field: &'static str) -> Result<String, LoginValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LoginValidationError::EmptyName(field));
    }
    Ok(trimmed.to_owned())
}

/// Bearer token and user returned by a successful sign-in.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    token: Zeroizing<String>,
    user: User,
}

impl AuthSession {
    /// Pair a token with its user.
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: Zeroizing::new(token.into()),
            user,
        }
    }

    /// Bearer token.
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Signed-in user.
    pub fn user(&self) -> &User {
        &self.user
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{EmployeeId, Role};
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("user@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    fn input<'a>(password: &'a str, first_name: &'a str) -> RegistrationInput<'a> {
        RegistrationInput {
            email: "new@example.com",
            password,
            first_name,
            last_name: "Lovelace",
            middle_name: Some("  "),
        }
    }

    #[rstest]
    fn registration_accepts_valid_input() {
        let registration = Registration::try_new(input("Abc123!", " Ada ")).expect("valid input");
        assert_eq!(registration.first_name(), "Ada");
        assert_eq!(registration.middle_name(), None);
        assert_eq!(registration.credentials().email(), "new@example.com");
    }

    #[rstest]
    fn registration_rejects_weak_password() {
        let err = Registration::try_new(input("abc123", "Ada")).expect_err("weak password");
        assert!(matches!(err, LoginValidationError::WeakPassword(_)));
    }

    #[rstest]
    fn registration_requires_names() {
        let err = Registration::try_new(input("Abc123!", " ")).expect_err("blank name");
        assert_eq!(err, LoginValidationError::EmptyName("first name"));
    }

    #[rstest]
    fn session_debug_redacts_token() {
        let session = AuthSession::new(
            "secret-token",
            User {
                id: EmployeeId::new(1),
                email: "a@example.com".to_owned(),
                first_name: "A".to_owned(),
                last_name: "B".to_owned(),
                role: Role::Director,
            },
        );
        assert_eq!(session.token(), "secret-token");
        assert!(!format!("{session:?}").contains("secret-token"));
    }
}
