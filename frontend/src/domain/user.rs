//! Users and employees.
//!
//! A [`User`] is the signed-in identity carried by the session. An
//! [`Employee`] is a directory record managed by Directors, and an
//! [`EmployeeShort`] is the compact roster entry embedded in projects.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::{EmployeeId, Role};

/// Signed-in user identity.
///
/// Serialised with camelCase keys; this is also the shape persisted with the
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Employee id of the user.
    pub id: EmployeeId,
    /// Sign-in email.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role governing every capability check.
    pub role: Role,
}

impl User {
    /// `"first last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}

/// Employee directory record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Employee id.
    pub id: EmployeeId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Optional middle name.
    pub middle_name: Option<String>,
    /// Contact email.
    pub email: String,
    /// Role.
    pub role: Role,
}

impl Employee {
    /// `"first last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }

    /// Case-insensitive match on first name, last name, email, or
    /// `"last first"`. A blank term matches everyone.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::{Employee, EmployeeId, Role};
    ///
    /// let ada = Employee {
    ///     id: EmployeeId::new(1),
    ///     first_name: "Ada".into(),
    ///     last_name: "Lovelace".into(),
    ///     middle_name: None,
    ///     email: "ada@example.com".into(),
    ///     role: Role::Employee,
    /// };
    /// assert!(ada.matches_search("lovelace ada"));
    /// assert!(!ada.matches_search("ada lovelace"));
    /// ```
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let reversed = format!("{} {}", self.last_name, self.first_name).to_lowercase();
        [&self.first_name, &self.last_name, &self.email]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
            || reversed.contains(&needle)
    }
}

/// Filter employees for a picker by [`Employee::matches_search`].
#[must_use]
pub fn search_employees<'a>(employees: &'a [Employee], term: &str) -> Vec<&'a Employee> {
    employees
        .iter()
        .filter(|employee| employee.matches_search(term))
        .collect()
}

/// Compact roster entry embedded in project payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeShort {
    /// Employee id.
    pub id: EmployeeId,
    /// Display name as formatted by the backend.
    pub full_name: String,
    /// Role.
    pub role: Role,
}

/// Payload for creating an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Optional middle name.
    pub middle_name: Option<String>,
    /// Contact and sign-in email.
    pub email: String,
    /// Initial password; satisfies the password policy.
    pub password: Zeroizing<String>,
    /// Role.
    pub role: Role,
}

/// Payload for updating an employee. The password is only sent when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeUpdate {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Optional middle name.
    pub middle_name: Option<String>,
    /// Contact email.
    pub email: String,
    /// Replacement password.
    pub password: Option<Zeroizing<String>>,
    /// Role.
    pub role: Role,
}

fn join_name(first: &str, last: &str) -> String {
    format!("{} {}", first.trim(), last.trim()).trim().to_owned()
}
