//! Password policy shared by registration and the employee dialogs.

use std::sync::OnceLock;

use regex::Regex;

/// Message shown whenever a password fails the policy.
pub const PASSWORD_POLICY_MESSAGE: &str = "Password must be at least 6 characters and include upper, lower, and special characters (#$!?%^&*).";

/// Minimum password length in characters.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// First rule a password failed. Every variant displays
/// [`PASSWORD_POLICY_MESSAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordPolicyError {
    /// Fewer than six characters.
    #[error("{}", PASSWORD_POLICY_MESSAGE)]
    TooShort,
    /// No ASCII lowercase letter.
    #[error("{}", PASSWORD_POLICY_MESSAGE)]
    MissingLowercase,
    /// No ASCII uppercase letter.
    #[error("{}", PASSWORD_POLICY_MESSAGE)]
    MissingUppercase,
    /// None of `#$!?%^&*`.
    #[error("{}", PASSWORD_POLICY_MESSAGE)]
    MissingSpecial,
}

static LOWERCASE_RE: OnceLock<Regex> = OnceLock::new();
static UPPERCASE_RE: OnceLock<Regex> = OnceLock::new();
static SPECIAL_RE: OnceLock<Regex> = OnceLock::new();

fn contains_class(cell: &'static OnceLock<Regex>, pattern: &str, value: &str) -> bool {
    cell.get_or_init(|| {
        // Length is checked separately; each pattern is one character class.
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("password regex failed to compile: {error}"))
    })
    .is_match(value)
}

/// Check `value` against the password policy.
///
/// # Errors
///
/// Returns the first rule the password fails.
///
/// # Examples
/// ```
/// use frontend::domain::validate_password;
///
/// assert!(validate_password("abc123").is_err());
/// assert!(validate_password("Abc123!").is_ok());
/// ```
pub fn validate_password(value: &str) -> Result<(), PasswordPolicyError> {
    if value.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(PasswordPolicyError::TooShort);
    }
    if !contains_class(&LOWERCASE_RE, "[a-z]", value) {
        return Err(PasswordPolicyError::MissingLowercase);
    }
    if !contains_class(&UPPERCASE_RE, "[A-Z]", value) {
        return Err(PasswordPolicyError::MissingUppercase);
    }
    if !contains_class(&SPECIAL_RE, r"[#$!?%^&*]", value) {
        return Err(PasswordPolicyError::MissingSpecial);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("abc123", PasswordPolicyError::MissingUppercase)]
    #[case("Ab1!", PasswordPolicyError::TooShort)]
    #[case("ABC123!", PasswordPolicyError::MissingLowercase)]
    #[case("Abc1234", PasswordPolicyError::MissingSpecial)]
    #[case("Abc123@", PasswordPolicyError::MissingSpecial)]
    fn rejects_weak_passwords(#[case] value: &str, #[case] expected: PasswordPolicyError) {
        assert_eq!(validate_password(value), Err(expected));
    }

    #[rstest]
    #[case("Abc123!")]
    #[case("aB#aaa")]
    #[case("Zz^&*%")]
    #[case("Password?")]
    fn accepts_strong_passwords(#[case] value: &str) {
        assert_eq!(validate_password(value), Ok(()));
    }

    #[rstest]
    fn every_failure_shows_the_policy_message() {
        let err = validate_password("abc123").expect_err("weak password");
        assert_eq!(err.to_string(), PASSWORD_POLICY_MESSAGE);
    }
}
