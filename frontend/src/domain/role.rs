//! Roles and their nested scope.
//!
//! The session payload spells the lowest role `Employee` while the employee
//! management endpoints spell it `Developer`. Both decode to
//! [`Role::Employee`]; adapters pick the spelling their endpoint expects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of user roles, ordered by scope.
///
/// # Examples
/// ```
/// use frontend::domain::Role;
///
/// let role: Role = "Developer".parse().expect("known role");
/// assert_eq!(role, Role::Employee);
/// assert!(Role::Director.includes(Role::ProjectManager));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full access, including employee management.
    Director,
    /// Manages the projects they are assigned to.
    ProjectManager,
    /// Works on assigned tasks.
    #[serde(alias = "Developer")]
    Employee,
}

/// Error returned when a role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'; expected Director, ProjectManager or Developer")]
pub struct UnknownRoleError(pub String);

impl Role {
    /// All roles from widest to narrowest scope.
    pub const ALL: [Self; 3] = [Self::Director, Self::ProjectManager, Self::Employee];

    const fn rank(self) -> u8 {
        match self {
            Self::Director => 3,
            Self::ProjectManager => 2,
            Self::Employee => 1,
        }
    }

    /// Whether this role's scope contains `other`'s.
    #[must_use]
    pub const fn includes(self, other: Self) -> bool {
        self.rank() >= other.rank()
    }

    /// Spelling used by session and user payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Director => "Director",
            Self::ProjectManager => "ProjectManager",
            Self::Employee => "Employee",
        }
    }

    /// Spelling used by the employee management endpoints.
    #[must_use]
    pub const fn as_staff_str(self) -> &'static str {
        match self {
            Self::Employee => "Developer",
            other => other.as_str(),
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Director => "Director",
            Self::ProjectManager => "Project Manager",
            Self::Employee => "Developer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "director" => Ok(Self::Director),
            "projectmanager" | "manager" => Ok(Self::ProjectManager),
            "employee" | "developer" => Ok(Self::Employee),
            _ => Err(UnknownRoleError(s.to_owned())),
        }
    }
}
