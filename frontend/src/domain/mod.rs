//! Domain types, authorization rules and the services behind each page.
//!
//! Purpose: keep everything the client decides locally (who may do what,
//! how the project wizard validates and what an edit sends) free of I/O.
//! Services reach the backend only through the traits in [`ports`].
//!
//! Public surface:
//! - [`AppContext`] and [`AuthGate`]: explicit session state and the page gate.
//! - [`can`] with [`Capability`]: every role check.
//! - [`ProjectWizard`]: the five-step project form and its submission.
//! - One service per page family, generic over the ports it drives.

pub mod access;
pub mod auth;
mod auth_service;
pub mod context;
mod dashboard_service;
pub mod dialog;
mod employee_directory_service;
pub mod error;
mod ids;
pub mod navigation;
pub mod password;
pub mod ports;
pub mod project;
mod project_service;
mod project_wizard_service;
pub mod role;
mod service_support;
pub mod task;
mod task_service;
#[cfg(test)]
pub(crate) mod test_fixtures;
pub mod trace_id;
pub mod user;
pub mod wizard;

pub use self::access::{
    Capability, can, can_change_assignee, can_edit_task, can_manage_project, is_director,
};
pub use self::auth::{
    AuthSession, LoginCredentials, LoginValidationError, Registration, RegistrationInput,
};
pub use self::auth_service::AuthService;
pub use self::context::{AppContext, AuthGate, GateDecision, SessionState};
pub use self::dashboard_service::{DASHBOARD_LIMIT, Dashboard, DashboardService};
pub use self::dialog::{DialogMode, EmployeeDialog, EmployeeForm, EmployeeSubmission};
pub use self::employee_directory_service::EmployeeDirectoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{DocumentId, EmployeeId, ProjectId, TaskId};
pub use self::navigation::{NavItem, Route, RouteParseError, nav_items};
pub use self::password::{
    PASSWORD_MIN_LENGTH, PASSWORD_POLICY_MESSAGE, PasswordPolicyError, validate_password,
};
pub use self::project::{
    Attachment, NewProject, Project, ProjectDocument, ProjectFields, ProjectQuery, ProjectUpdate,
};
pub use self::project_service::{ProjectDetail, ProjectService};
pub use self::project_wizard_service::ProjectWizardService;
pub use self::role::{Role, UnknownRoleError};
pub use self::service_support::SIGN_IN_REQUIRED;
pub use self::task::{
    NewTask, PRIORITY_MAX, PRIORITY_MIN, Task, TaskEdit, TaskFilter, TaskForm, TaskFormError,
    TaskQuery, TaskSort, TaskStatus, TaskUpdate, UnknownTaskOptionError, parse_priority,
};
pub use self::task_service::TaskService;
pub use self::trace_id::TraceId;
pub use self::user::{
    Employee, EmployeeShort, EmployeeUpdate, NewEmployee, User, search_employees,
};
pub use self::wizard::{
    MAX_ATTACHMENTS, ProjectForm, ProjectSubmission, ProjectWizard, RosterChange, WizardError,
    WizardMode, WizardStep,
};

/// Result alias used by the services.
///
/// # Examples
/// ```
/// use frontend::domain::{DomainResult, Error};
///
/// fn refuse() -> DomainResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(refuse().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
