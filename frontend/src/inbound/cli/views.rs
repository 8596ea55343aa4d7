//! Plain-text renderers for each page.
//!
//! Renderers are pure: they take the data a page shows and return the text
//! the CLI prints. Permission-dependent actions are listed only when the
//! caller says they are available.

use crate::domain::{
    Dashboard, Employee, EmployeeDialog, EmployeeShort, NavItem, Project, ProjectDetail,
    ProjectWizard, Route, Task, User, WizardStep,
};

/// Left-aligned table with a header row and a rule.
struct Table {
    header: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(header: Vec<&'static str>) -> Self {
        Self {
            header,
            rows: Vec::new(),
        }
    }

    fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    fn render(&self) -> String {
        let widths: Vec<usize> = self
            .header
            .iter()
            .enumerate()
            .map(|(col, title)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(col))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(title.chars().count()))
                    .max()
                    .unwrap_or_default()
            })
            .collect();
        let line = |cells: Vec<&str>| {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_owned()
        };
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        let mut out = vec![
            line(self.header.clone()),
            line(rule.iter().map(String::as_str).collect()),
        ];
        out.extend(
            self.rows
                .iter()
                .map(|row| line(row.iter().map(String::as_str).collect())),
        );
        out.join("\n") + "\n"
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|text| !text.trim().is_empty()).unwrap_or("-")
}

/// Message shown instead of a page the user may not open.
#[must_use]
pub fn access_denied(message: &str) -> String {
    format!("Access denied\n{message}\n")
}

/// Shown when a page needs a signed-in user.
#[must_use]
pub fn login_required() -> String {
    format!(
        "Redirecting to {}.\nSign in with `taskdesk login --email <email> --password <password>`.\n",
        Route::Login
    )
}

/// The page a completed action leads to.
#[must_use]
pub fn redirect(route: Route) -> String {
    format!("Next: {route}\n")
}

/// Menu entries, marking the one for `current`.
#[must_use]
pub fn menu(items: &[NavItem], current: &str) -> String {
    let entries: Vec<String> = items
        .iter()
        .map(|item| {
            if item.is_active(current) {
                format!("[{}]", item.label)
            } else {
                item.label.to_owned()
            }
        })
        .collect();
    format!("Menu: {}\n", entries.join(" | "))
}

/// Signed-in identity.
#[must_use]
pub fn whoami(user: &User, items: &[NavItem]) -> String {
    format!(
        "Signed in as {} <{}> ({})\n{}",
        user.full_name(),
        user.email,
        user.role.label(),
        menu(items, "/"),
    )
}

/// Welcome line after sign-in or registration.
#[must_use]
pub fn signed_in(user: &User) -> String {
    format!("Welcome, {}.\n{}", user.full_name(), redirect(Route::Dashboard))
}

/// Confirmation after sign-out.
#[must_use]
pub fn signed_out() -> String {
    format!("Signed out.\n{}", redirect(Route::Login))
}

/// Login page for a visitor.
#[must_use]
pub fn login_page(user: Option<&User>) -> String {
    match user {
        Some(user) => format!(
            "Already signed in as {}.\n{}",
            user.full_name(),
            redirect(Route::Dashboard)
        ),
        None => login_required(),
    }
}

/// Dashboard summary.
#[must_use]
pub fn dashboard_page(dashboard: &Dashboard) -> String {
    let mut out = format!(
        "Welcome back, {} ({})\n\nRecent projects\n",
        dashboard.user.full_name(),
        dashboard.user.role.label()
    );
    if dashboard.projects.is_empty() {
        out.push_str("No projects yet.\n");
    } else {
        out.push_str(&project_table(&dashboard.projects));
    }
    out.push_str("\nRecent tasks\n");
    if dashboard.tasks.is_empty() {
        out.push_str("No tasks yet.\n");
    } else {
        out.push_str(&task_table(&dashboard.tasks));
    }
    out
}

/// Employee management table.
#[must_use]
pub fn employee_table(employees: &[&Employee]) -> String {
    if employees.is_empty() {
        return "No employees found.\n".to_owned();
    }
    let mut table = Table::new(vec!["ID", "Name", "Email", "Role"]);
    for employee in employees {
        table.row(vec![
            employee.id.to_string(),
            employee.full_name(),
            employee.email.clone(),
            employee.role.label().to_owned(),
        ]);
    }
    table.render()
}

/// Employees assigned to a project.
#[must_use]
pub fn roster_table(roster: &[EmployeeShort]) -> String {
    if roster.is_empty() {
        return "No employees assigned.\n".to_owned();
    }
    let mut table = Table::new(vec!["ID", "Name", "Role"]);
    for member in roster {
        table.row(vec![
            member.id.to_string(),
            member.full_name.clone(),
            member.role.label().to_owned(),
        ]);
    }
    table.render()
}

/// Outcome recorded on the employee dialog.
#[must_use]
pub fn dialog_outcome(dialog: &EmployeeDialog) -> String {
    match (dialog.success(), dialog.error()) {
        (Some(message), _) => format!("{message}\n"),
        (None, Some(message)) => format!("Error: {message}\n"),
        (None, None) => String::new(),
    }
}

/// Project list.
#[must_use]
pub fn project_table(projects: &[Project]) -> String {
    if projects.is_empty() {
        return "No projects found.\n".to_owned();
    }
    let mut table = Table::new(vec!["ID", "Name", "Customer", "Start", "End", "Priority", "Manager"]);
    for project in projects {
        table.row(vec![
            project.id.to_string(),
            project.name.clone(),
            project.customer_company.clone(),
            project.start_day(),
            project.end_day(),
            project.priority.to_string(),
            or_dash(Some(&project.manager_full_name)).to_owned(),
        ]);
    }
    table.render()
}

/// Project page with its roster, documents and tasks.
#[must_use]
pub fn project_detail(detail: &ProjectDetail) -> String {
    let project = &detail.project;
    let mut out = format!(
        "{name} (#{id})\nCustomer: {customer}\nExecutor: {executor}\nDates: {start} to {end}\nPriority: {priority}\nManager: {manager}\n",
        name = project.name,
        id = project.id,
        customer = or_dash(Some(&project.customer_company)),
        executor = or_dash(Some(&project.executor_company)),
        start = project.start_day(),
        end = project.end_day(),
        priority = project.priority,
        manager = or_dash(Some(&project.manager_full_name)),
    );
    out.push_str("\nTeam\n");
    if project.employees.is_empty() {
        out.push_str("No employees assigned.\n");
    } else {
        for member in &project.employees {
            out.push_str(&format!(
                "  {} {} ({})\n",
                member.id,
                member.full_name,
                member.role.label()
            ));
        }
    }
    out.push_str("\nDocuments\n");
    if project.documents.is_empty() {
        out.push_str("No documents.\n");
    } else {
        for document in &project.documents {
            out.push_str(&format!("  {} {}\n", document.id, document.display_name()));
        }
    }
    out.push_str("\nTasks\n");
    if detail.tasks.is_empty() {
        out.push_str("No tasks yet.\n");
    } else {
        out.push_str(&task_table(&detail.tasks));
    }
    let actions: Vec<String> = [
        (detail.can_edit, Route::EditProject(project.id).to_string()),
        (
            detail.can_add_task,
            Route::NewTask {
                project_id: Some(project.id),
            }
            .to_string(),
        ),
        (detail.can_delete, format!("taskdesk projects delete {}", project.id)),
    ]
    .into_iter()
    .filter_map(|(allowed, action)| allowed.then_some(action))
    .collect();
    if !actions.is_empty() {
        out.push_str(&format!("\nActions: {}\n", actions.join(", ")));
    }
    out
}

/// Current wizard step and the values entered so far.
#[must_use]
pub fn wizard_page(wizard: &ProjectWizard) -> String {
    let step = wizard.step();
    let form = wizard.form();
    let heading = match wizard.project_id() {
        Some(id) => format!("Edit project #{id}"),
        None => "New project".to_owned(),
    };
    let progress: Vec<String> = WizardStep::ALL
        .into_iter()
        .map(|each| {
            let marker = if each == step { "*" } else { " " };
            format!("{marker}{}. {}", each.number(), each.title())
        })
        .collect();
    let manager = form
        .manager_id
        .map_or_else(|| "-".to_owned(), |id| id.to_string());
    let employees: Vec<String> = form.employee_ids.iter().map(ToString::to_string).collect();
    let documents: Vec<String> = wizard
        .documents()
        .iter()
        .map(|document| format!("{} {}", document.id, document.display_name()))
        .collect();
    format!(
        "{heading}\nStep {number} of {total}: {title}\n{progress}\n\nName: {name}\nDates: {start} to {end}\nPriority: {priority}\nCustomer: {customer}\nExecutor: {executor}\nManager: {manager}\nEmployees: {employees}\nDocuments: {documents}\n",
        number = step.number(),
        total = WizardStep::ALL.len(),
        title = step.title(),
        progress = progress.join("\n"),
        name = or_dash(Some(&form.name)),
        start = or_dash(Some(&form.start_date)),
        end = or_dash(Some(&form.end_date)),
        priority = or_dash(Some(&form.priority)),
        customer = or_dash(Some(&form.customer_company)),
        executor = or_dash(Some(&form.executor_company)),
        employees = or_dash(Some(&employees.join(", "))),
        documents = or_dash(Some(&documents.join(", "))),
    )
}

/// Task list.
#[must_use]
pub fn task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".to_owned();
    }
    let mut table = Table::new(vec!["ID", "Title", "Status", "Priority", "Assignee", "Project"]);
    for task in tasks {
        table.row(vec![
            task.id.to_string(),
            task.title.clone(),
            task.status.to_string(),
            task.priority.to_string(),
            or_dash(task.assignee_full_name.as_deref()).to_owned(),
            task.project_id.to_string(),
        ]);
    }
    table.render()
}

/// Actions available on a task page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskActions {
    /// Fields may be edited.
    pub edit: bool,
    /// The assignee may be changed.
    pub change_assignee: bool,
    /// The task may be deleted.
    pub delete: bool,
}

/// Task page.
#[must_use]
pub fn task_detail(task: &Task, actions: TaskActions) -> String {
    let mut out = format!(
        "{title} (#{id})\nStatus: {status}\nPriority: {priority}\nProject: {project}\nAuthor: {author}\nAssignee: {assignee}\n",
        title = task.title,
        id = task.id,
        status = task.status,
        priority = task.priority,
        project = Route::Project(task.project_id),
        author = or_dash(task.author_full_name.as_deref()),
        assignee = or_dash(task.assignee_full_name.as_deref()),
    );
    if !task.comment.trim().is_empty() {
        out.push_str(&format!("\n{}\n", task.comment));
    }
    let allowed: Vec<&str> = [
        (actions.edit, "edit"),
        (actions.change_assignee, "reassign"),
        (actions.delete, "delete"),
    ]
    .into_iter()
    .filter_map(|(on, label)| on.then_some(label))
    .collect();
    if !allowed.is_empty() {
        out.push_str(&format!("\nActions: {}\n", allowed.join(", ")));
    }
    out
}

/// New-task page for a project, or for any project when `None`.
#[must_use]
pub fn new_task_page(project: Option<&Project>) -> String {
    let target = project.map_or_else(
        || "a project".to_owned(),
        |project| format!("{} (#{})", project.name, project.id),
    );
    let flag = project.map_or_else(
        || "--project <id> ".to_owned(),
        |project| format!("--project {} ", project.id),
    );
    format!(
        "New task for {target}\nCreate it with `taskdesk tasks new {flag}--title <title> --priority <1-10> --assignee <id>`.\n"
    )
}
