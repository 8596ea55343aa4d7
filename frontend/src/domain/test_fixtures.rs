//! Builders shared by the service tests.

use super::{
    AppContext, AuthSession, EmployeeId, EmployeeShort, Project, ProjectId, Role, Task, TaskId,
    TaskStatus, User,
};

pub(crate) fn user(id: i64, role: Role) -> User {
    User {
        id: EmployeeId::new(id),
        email: format!("user{id}@example.com"),
        first_name: format!("First{id}"),
        last_name: format!("Last{id}"),
        role,
    }
}

pub(crate) fn signed_in(id: i64, role: Role) -> AppContext {
    AppContext::with_session(AuthSession::new("token", user(id, role)))
}

pub(crate) fn project(id: i64, manager: i64, roster: &[i64]) -> Project {
    Project {
        id: ProjectId::new(id),
        name: format!("Project {id}"),
        customer_company: "Customer".to_owned(),
        executor_company: "Executor".to_owned(),
        start_date: "2024-01-15T00:00:00".to_owned(),
        end_date: "2024-12-31T00:00:00".to_owned(),
        priority: 2,
        manager_id: EmployeeId::new(manager),
        manager_full_name: format!("First{manager} Last{manager}"),
        employees: roster
            .iter()
            .map(|member| EmployeeShort {
                id: EmployeeId::new(*member),
                full_name: format!("First{member} Last{member}"),
                role: Role::Employee,
            })
            .collect(),
        tasks_count: 0,
        documents: Vec::new(),
    }
}

pub(crate) fn task(id: i64, project: i64, assignee: Option<i64>) -> Task {
    Task {
        id: TaskId::new(id),
        title: format!("Task {id}"),
        comment: String::new(),
        priority: 1,
        status: TaskStatus::ToDo,
        author_id: EmployeeId::new(1),
        author_full_name: None,
        assignee_id: assignee.map(EmployeeId::new),
        assignee_full_name: assignee.map(|who| format!("First{who} Last{who}")),
        project_id: ProjectId::new(project),
    }
}
