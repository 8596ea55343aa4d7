//! Client-side authorization.
//!
//! Every check is a pure function of the signed-in user and the entity in
//! question; nothing is cached and nothing calls the backend. The backend
//! still enforces its own rules, so these checks only decide what the client
//! offers.

use super::{Project, Role, Route, Task, User};

/// An action or page whose availability depends on the user.
#[derive(Debug, Clone, Copy)]
pub enum Capability<'a> {
    /// List, create, edit and delete employees.
    ManageEmployees,
    /// Start the project wizard in create mode.
    CreateProject,
    /// Delete a project.
    DeleteProject,
    /// Delete a task.
    DeleteTask,
    /// Edit a project and its roster.
    ManageProject(&'a Project),
    /// Create a task, optionally within a known project.
    CreateTask(Option<&'a Project>),
    /// Edit a task's fields.
    EditTask(&'a Task),
    /// Change a task's assignee.
    ChangeAssignee,
    /// Open a page.
    ViewRoute(Route),
}

/// Whether `user` holds `capability`. Signed-out users hold nothing.
///
/// # Examples
/// ```
/// use frontend::domain::{Capability, EmployeeId, Role, User, can};
///
/// let pm = User {
///     id: EmployeeId::new(2),
///     email: "pm@example.com".into(),
///     first_name: "Pat".into(),
///     last_name: "Manager".into(),
///     role: Role::ProjectManager,
/// };
/// assert!(can(Some(&pm), Capability::ChangeAssignee));
/// assert!(!can(Some(&pm), Capability::DeleteTask));
/// assert!(!can(None, Capability::ChangeAssignee));
/// ```
#[must_use]
pub fn can(user: Option<&User>, capability: Capability<'_>) -> bool {
    let Some(user) = user else {
        return false;
    };
    match capability {
        Capability::ManageEmployees
        | Capability::CreateProject
        | Capability::DeleteProject
        | Capability::DeleteTask => user.role == Role::Director,
        Capability::ManageProject(project) => manages(user, project),
        Capability::CreateTask(Some(project)) => manages(user, project),
        Capability::CreateTask(None) | Capability::ChangeAssignee => {
            user.role.includes(Role::ProjectManager)
        }
        Capability::EditTask(task) => match user.role {
            Role::Director | Role::ProjectManager => true,
            Role::Employee => task.assignee_id == Some(user.id),
        },
        Capability::ViewRoute(route) => match route {
            Route::Employees => user.role == Role::Director,
            _ => true,
        },
    }
}

fn manages(user: &User, project: &Project) -> bool {
    match user.role {
        Role::Director => true,
        Role::ProjectManager => project.manager_id == user.id,
        Role::Employee => false,
    }
}

/// Whether `user` is a Director.
#[must_use]
pub fn is_director(user: Option<&User>) -> bool {
    user.is_some_and(|signed_in| signed_in.role == Role::Director)
}

/// Whether `user` may edit `project`.
#[must_use]
pub fn can_manage_project(user: Option<&User>, project: &Project) -> bool {
    can(user, Capability::ManageProject(project))
}

/// Whether `user` may edit `task`'s fields.
#[must_use]
pub fn can_edit_task(user: Option<&User>, task: &Task) -> bool {
    can(user, Capability::EditTask(task))
}

/// Whether `user` may reassign tasks.
#[must_use]
pub fn can_change_assignee(user: Option<&User>) -> bool {
    can(user, Capability::ChangeAssignee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmployeeId, ProjectId, TaskId, TaskStatus};
    use rstest::{fixture, rstest};

    const DIRECTOR: i64 = 1;
    const MANAGER: i64 = 2;
    const OTHER_MANAGER: i64 = 3;
    const ASSIGNEE: i64 = 4;
    const BYSTANDER: i64 = 5;

    fn user(id: i64, role: Role) -> User {
        User {
            id: EmployeeId::new(id),
            email: format!("{id}@example.com"),
            first_name: "First".to_owned(),
            last_name: "Last".to_owned(),
            role,
        }
    }

    #[fixture]
    fn project() -> Project {
        Project {
            id: ProjectId::new(10),
            name: "Apollo".to_owned(),
            customer_company: "C".to_owned(),
            executor_company: "E".to_owned(),
            start_date: "2024-01-01".to_owned(),
            end_date: "2024-02-01".to_owned(),
            priority: 1,
            manager_id: EmployeeId::new(MANAGER),
            manager_full_name: "Pat Manager".to_owned(),
            employees: Vec::new(),
            tasks_count: 1,
            documents: Vec::new(),
        }
    }

    #[fixture]
    fn task() -> Task {
        Task {
            id: TaskId::new(20),
            title: "Write docs".to_owned(),
            comment: "All of them".to_owned(),
            priority: 2,
            status: TaskStatus::ToDo,
            author_id: EmployeeId::new(MANAGER),
            author_full_name: None,
            assignee_id: Some(EmployeeId::new(ASSIGNEE)),
            assignee_full_name: None,
            project_id: ProjectId::new(10),
        }
    }

    #[rstest]
    #[case(user(DIRECTOR, Role::Director), true)]
    #[case(user(MANAGER, Role::ProjectManager), true)]
    #[case(user(OTHER_MANAGER, Role::ProjectManager), false)]
    #[case(user(MANAGER, Role::Employee), false)]
    fn manage_project_requires_director_or_own_manager(
        project: Project,
        #[case] who: User,
        #[case] expected: bool,
    ) {
        assert_eq!(can_manage_project(Some(&who), &project), expected);
        assert_eq!(can(Some(&who), Capability::CreateTask(Some(&project))), expected);
    }

    #[rstest]
    #[case(user(DIRECTOR, Role::Director), true)]
    #[case(user(OTHER_MANAGER, Role::ProjectManager), true)]
    #[case(user(ASSIGNEE, Role::Employee), true)]
    #[case(user(BYSTANDER, Role::Employee), false)]
    fn edit_task_allows_managers_and_assignee(task: Task, #[case] who: User, #[case] expected: bool) {
        assert_eq!(can_edit_task(Some(&who), &task), expected);
    }

    #[rstest]
    fn unassigned_task_is_not_editable_by_employees(mut task: Task) {
        task.assignee_id = None;
        assert!(!can_edit_task(Some(&user(ASSIGNEE, Role::Employee)), &task));
    }

    #[rstest]
    #[case(Role::Director, true, true)]
    #[case(Role::ProjectManager, false, true)]
    #[case(Role::Employee, false, false)]
    fn role_wide_capabilities(
        #[case] role: Role,
        #[case] director_only: bool,
        #[case] manager_or_above: bool,
    ) {
        let who = user(BYSTANDER, role);
        for capability in [
            Capability::ManageEmployees,
            Capability::CreateProject,
            Capability::DeleteProject,
            Capability::DeleteTask,
            Capability::ViewRoute(Route::Employees),
        ] {
            assert_eq!(can(Some(&who), capability), director_only, "{capability:?}");
        }
        assert_eq!(can_change_assignee(Some(&who)), manager_or_above);
        assert_eq!(can(Some(&who), Capability::CreateTask(None)), manager_or_above);
        assert_eq!(is_director(Some(&who)), director_only);
    }

    #[rstest]
    fn signed_out_user_has_no_capabilities(project: Project, task: Task) {
        for capability in [
            Capability::ManageEmployees,
            Capability::ManageProject(&project),
            Capability::EditTask(&task),
            Capability::ChangeAssignee,
            Capability::ViewRoute(Route::Dashboard),
        ] {
            assert!(!can(None, capability), "{capability:?}");
        }
    }
}
