//! Application routes and the navigation menu.

use std::fmt;
use std::str::FromStr;

use super::access::{Capability, can};
use super::{ProjectId, TaskId, User};

/// A page of the application.
///
/// # Examples
/// ```
/// use frontend::domain::{ProjectId, Route};
///
/// let route: Route = "/projects/7/edit".parse().expect("known route");
/// assert_eq!(route, Route::EditProject(ProjectId::new(7)));
/// assert_eq!(route.to_string(), "/projects/7/edit");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/login`
    Login,
    /// `/`
    Dashboard,
    /// `/projects`
    Projects,
    /// `/projects/new`
    NewProject,
    /// `/projects/:id`
    Project(ProjectId),
    /// `/projects/:id/edit`
    EditProject(ProjectId),
    /// `/tasks`
    Tasks,
    /// `/tasks/new[?projectId=]`
    NewTask {
        /// Project preselected in the form.
        project_id: Option<ProjectId>,
    },
    /// `/tasks/:id`
    Task(TaskId),
    /// `/employees`
    Employees,
}

/// Error returned for paths that name no page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no page at '{0}'")]
pub struct RouteParseError(pub String);

impl FromStr for Route {
    type Err = RouteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || RouteParseError(s.to_owned());
        let (path, query) = s.trim().split_once('?').unwrap_or((s.trim(), ""));
        let segments: Vec<&str> = path.split('/').filter(|part| !part.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Self::Dashboard,
            ["login"] => Self::Login,
            ["projects"] => Self::Projects,
            ["projects", "new"] => Self::NewProject,
            ["projects", id] => Self::Project(id.parse().map_err(|_| unknown())?),
            ["projects", id, "edit"] => Self::EditProject(id.parse().map_err(|_| unknown())?),
            ["tasks"] => Self::Tasks,
            ["tasks", "new"] => Self::NewTask {
                project_id: query_project_id(query).map_err(|_| unknown())?,
            },
            ["tasks", id] => Self::Task(id.parse().map_err(|_| unknown())?),
            ["employees"] => Self::Employees,
            _ => return Err(unknown()),
        };
        Ok(route)
    }
}

fn query_project_id(query: &str) -> Result<Option<ProjectId>, std::num::ParseIntError> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "projectId")
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::parse::<ProjectId>)
        .transpose()
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Login => f.write_str("/login"),
            Self::Dashboard => f.write_str("/"),
            Self::Projects => f.write_str("/projects"),
            Self::NewProject => f.write_str("/projects/new"),
            Self::Project(id) => write!(f, "/projects/{id}"),
            Self::EditProject(id) => write!(f, "/projects/{id}/edit"),
            Self::Tasks => f.write_str("/tasks"),
            Self::NewTask { project_id: None } => f.write_str("/tasks/new"),
            Self::NewTask {
                project_id: Some(id),
            } => write!(f, "/tasks/new?projectId={id}"),
            Self::Task(id) => write!(f, "/tasks/{id}"),
            Self::Employees => f.write_str("/employees"),
        }
    }
}

impl Route {
    /// Message shown when a signed-in user may not open this page.
    #[must_use]
    pub const fn denial_message(self) -> &'static str {
        match self {
            Self::Employees => "Only Directors have access to manage employees.",
            _ => "You do not have access to this page.",
        }
    }
}

/// One entry in the navigation menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    /// Visible label.
    pub label: &'static str,
    /// Target path.
    pub href: &'static str,
}

impl NavItem {
    /// Whether `path` is this item's page or one of its sub-pages.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::NavItem;
    ///
    /// let item = NavItem { label: "Projects", href: "/projects" };
    /// assert!(item.is_active("/projects/3"));
    /// assert!(!item.is_active("/projectsx"));
    /// ```
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        let current = path.split_once('?').map_or(path, |(before, _)| before);
        if self.href == "/" {
            return current == "/";
        }
        current == self.href
            || current
                .strip_prefix(self.href)
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

const NAV_ITEMS: [(NavItem, Route); 4] = [
    (
        NavItem {
            label: "Dashboard",
            href: "/",
        },
        Route::Dashboard,
    ),
    (
        NavItem {
            label: "Projects",
            href: "/projects",
        },
        Route::Projects,
    ),
    (
        NavItem {
            label: "Tasks",
            href: "/tasks",
        },
        Route::Tasks,
    ),
    (
        NavItem {
            label: "Employees",
            href: "/employees",
        },
        Route::Employees,
    ),
];

/// Menu entries visible to `user`; empty when signed out.
#[must_use]
pub fn nav_items(user: Option<&User>) -> Vec<NavItem> {
    if user.is_none() {
        return Vec::new();
    }
    NAV_ITEMS
        .iter()
        .filter(|(_, route)| can(user, Capability::ViewRoute(*route)))
        .map(|(item, _)| *item)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmployeeId, Role};
    use rstest::rstest;

    fn user(role: Role) -> User {
        User {
            id: EmployeeId::new(1),
            email: "u@example.com".to_owned(),
            first_name: "U".to_owned(),
            last_name: "Ser".to_owned(),
            role,
        }
    }

    #[rstest]
    #[case("/", Route::Dashboard)]
    #[case("/login", Route::Login)]
    #[case("/projects/", Route::Projects)]
    #[case("/projects/new", Route::NewProject)]
    #[case("/projects/12", Route::Project(ProjectId::new(12)))]
    #[case("/tasks/new", Route::NewTask { project_id: None })]
    #[case("/tasks/new?projectId=4", Route::NewTask { project_id: Some(ProjectId::new(4)) })]
    #[case("/tasks/new?projectId=", Route::NewTask { project_id: None })]
    #[case("/tasks/9", Route::Task(TaskId::new(9)))]
    #[case("/employees", Route::Employees)]
    fn parses_and_formats_routes(#[case] path: &str, #[case] expected: Route) {
        let parsed: Route = path.parse().expect("known route");
        assert_eq!(parsed, expected);
        let reparsed: Route = parsed.to_string().parse().expect("formatted route parses");
        assert_eq!(reparsed, expected);
    }

    #[rstest]
    #[case("/projects/abc")]
    #[case("/unknown")]
    #[case("/tasks/new?projectId=x")]
    fn rejects_unknown_paths(#[case] path: &str) {
        assert!(path.parse::<Route>().is_err());
    }

    #[rstest]
    fn signed_out_menu_is_empty() {
        assert!(nav_items(None).is_empty());
    }

    #[rstest]
    #[case(Role::Director, vec!["Dashboard", "Projects", "Tasks", "Employees"])]
    #[case(Role::ProjectManager, vec!["Dashboard", "Projects", "Tasks"])]
    #[case(Role::Employee, vec!["Dashboard", "Projects", "Tasks"])]
    fn menu_depends_on_role(#[case] role: Role, #[case] expected: Vec<&str>) {
        let signed_in = user(role);
        let labels: Vec<&str> = nav_items(Some(&signed_in))
            .into_iter()
            .map(|item| item.label)
            .collect();
        assert_eq!(labels, expected);
    }

    #[rstest]
    #[case("/", "/", true)]
    #[case("/", "/projects", false)]
    #[case("/tasks", "/tasks", true)]
    #[case("/tasks", "/tasks/3?x=1", true)]
    #[case("/tasks", "/tasksmith", false)]
    fn active_item_matches_prefix(#[case] href: &'static str, #[case] path: &str, #[case] active: bool) {
        let item = NavItem { label: "x", href };
        assert_eq!(item.is_active(path), active);
    }
}
