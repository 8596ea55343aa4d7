//! Page dispatch.
//!
//! Every command is checked by [`AuthGate`] against the page it renders
//! before any service runs. Services do the work; [`views`] renders it.

use std::sync::Arc;

use tracing::warn;

use super::args::{
    Command, EditProjectArgs, EditTaskArgs, EmployeeChanges, EmployeeFields, EmployeesCommand,
    NewProjectArgs, NewTaskArgs, ProjectFilters, ProjectsCommand, RegisterArgs, TaskFilters,
    TasksCommand,
};
use super::attachments::read_attachments;
use super::views::{self, TaskActions};
use crate::domain::ports::{AuthApi, EmployeesApi, ProjectsApi, SessionRepository, TasksApi};
use crate::domain::{
    AppContext, AuthGate, AuthService, Capability, DashboardService, EmployeeDialog,
    EmployeeDirectoryService, EmployeeId, Error, GateDecision, LoginCredentials, MAX_ATTACHMENTS,
    ProjectId, ProjectQuery, ProjectService, ProjectWizard, ProjectWizardService, Registration,
    RegistrationInput, Route, SIGN_IN_REQUIRED, TaskEdit, TaskFilter, TaskForm, TaskId,
    TaskService, nav_items, search_employees,
};

/// Runs CLI commands as pages against one backend and session store.
pub struct Shell<B, S> {
    ctx: AppContext,
    auth: AuthService<B, S>,
    employees: EmployeeDirectoryService<B>,
    projects: ProjectService<B, B>,
    wizards: ProjectWizardService<B>,
    tasks: TaskService<B, B>,
    dashboard: DashboardService<B, B>,
}

impl<B, S> Shell<B, S> {
    /// Wire the services over `backend` for a hydrated `ctx`.
    pub fn new(ctx: AppContext, backend: Arc<B>, sessions: Arc<S>) -> Self {
        Self {
            ctx,
            auth: AuthService::new(Arc::clone(&backend), sessions),
            employees: EmployeeDirectoryService::new(Arc::clone(&backend)),
            projects: ProjectService::new(Arc::clone(&backend), Arc::clone(&backend)),
            wizards: ProjectWizardService::new(Arc::clone(&backend)),
            tasks: TaskService::new(Arc::clone(&backend), Arc::clone(&backend)),
            dashboard: DashboardService::new(Arc::clone(&backend), backend),
        }
    }

    /// Current application context.
    #[must_use]
    pub fn context(&self) -> &AppContext {
        &self.ctx
    }
}

impl<B, S> Shell<B, S>
where
    B: AuthApi + EmployeesApi + ProjectsApi + TasksApi,
    S: SessionRepository,
{
    /// Run `command` and return the text to print.
    ///
    /// A gate refusal is rendered as the page, not returned as an error.
    ///
    /// # Errors
    ///
    /// Returns the service error when the page or action fails.
    pub async fn run(&mut self, command: Command) -> Result<String, Error> {
        if let Some(route) = command.route() {
            match AuthGate::check(&self.ctx, route) {
                GateDecision::Pending => return Ok(String::new()),
                GateDecision::RedirectToLogin => return Ok(views::login_required()),
                GateDecision::Denied(message) => return Ok(views::access_denied(message)),
                GateDecision::Render => {}
            }
        }
        match command {
            Command::Login { email, password } => self.login(&email, &password).await,
            Command::Register(args) => self.register(&args).await,
            Command::Logout => {
                self.auth.logout(&mut self.ctx).await?;
                Ok(views::signed_out())
            }
            Command::Whoami => {
                let user = self
                    .ctx
                    .user()
                    .ok_or_else(|| Error::unauthorized(SIGN_IN_REQUIRED))?;
                Ok(views::whoami(user, &nav_items(Some(user))))
            }
            Command::Visit { path } => self.visit(path).await,
            Command::Dashboard => self.visit(Route::Dashboard).await,
            Command::Employees(command) => self.run_employees(command).await,
            Command::Projects(command) => self.run_projects(command).await,
            Command::Tasks(command) => self.run_tasks(command).await,
        }
    }

    async fn login(&mut self, email: &str, password: &str) -> Result<String, Error> {
        let credentials = LoginCredentials::try_from_parts(email, password)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let user = self.auth.login(&mut self.ctx, &credentials).await?;
        Ok(views::signed_in(&user))
    }

    async fn register(&mut self, args: &RegisterArgs) -> Result<String, Error> {
        let registration = Registration::try_new(RegistrationInput {
            email: &args.email,
            password: &args.password,
            first_name: &args.first_name,
            last_name: &args.last_name,
            middle_name: args.middle_name.as_deref(),
        })
        .map_err(|err| Error::invalid_request(err.to_string()))?;
        let user = self.auth.register(&mut self.ctx, &registration).await?;
        Ok(views::signed_in(&user))
    }

    async fn visit(&self, route: Route) -> Result<String, Error> {
        let body = match route {
            Route::Login => views::login_page(self.ctx.user()),
            Route::Dashboard => views::dashboard_page(&self.dashboard.overview(&self.ctx).await?),
            Route::Projects => self.project_list(&ProjectQuery::default()).await?,
            Route::NewProject => views::wizard_page(&self.wizards.start_create(&self.ctx)?),
            Route::Project(id) => self.project_detail(id).await?,
            Route::EditProject(id) => {
                views::wizard_page(&self.wizards.load_for_edit(&self.ctx, id).await?)
            }
            Route::Tasks => self.task_list(&TaskFilter::default()).await?,
            Route::NewTask { project_id } => self.new_task_page(project_id).await?,
            Route::Task(id) => self.task_detail(id).await?,
            Route::Employees => self.employee_list(None).await?,
        };
        let items = nav_items(self.ctx.user());
        if items.is_empty() {
            return Ok(body);
        }
        Ok(format!("{}\n{body}", views::menu(&items, &route.to_string())))
    }

    async fn run_employees(&self, command: EmployeesCommand) -> Result<String, Error> {
        match command {
            EmployeesCommand::List { search } => self.employee_list(search.as_deref()).await,
            EmployeesCommand::Add(fields) => self.add_employee(fields).await,
            EmployeesCommand::Edit { id, changes } => self.edit_employee(id, changes).await,
            EmployeesCommand::Delete { id } => {
                self.employees.delete(&self.ctx, id).await?;
                Ok(format!("Employee {id} deleted.\n"))
            }
        }
    }

    async fn employee_list(&self, search: Option<&str>) -> Result<String, Error> {
        let all = self.employees.list(&self.ctx).await?;
        let shown = match search {
            Some(term) => search_employees(&all, term),
            None => all.iter().collect(),
        };
        Ok(views::employee_table(&shown))
    }

    async fn add_employee(&self, fields: EmployeeFields) -> Result<String, Error> {
        let mut dialog = EmployeeDialog::default();
        dialog.open_add();
        let form = dialog.form_mut();
        form.first_name = fields.first_name;
        form.last_name = fields.last_name;
        form.middle_name = fields.middle_name.unwrap_or_default();
        form.email = fields.email;
        form.role = fields.role;
        dialog.set_password(&fields.password);
        self.employees.submit(&self.ctx, &mut dialog).await?;
        Ok(views::dialog_outcome(&dialog))
    }

    async fn edit_employee(&self, id: EmployeeId, changes: EmployeeChanges) -> Result<String, Error> {
        let employee = self.employees.get(&self.ctx, id).await?;
        let mut dialog = EmployeeDialog::default();
        dialog.open_edit(&employee);
        let form = dialog.form_mut();
        if let Some(first_name) = changes.first_name {
            form.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            form.last_name = last_name;
        }
        if let Some(middle_name) = changes.middle_name {
            form.middle_name = middle_name;
        }
        if let Some(email) = changes.email {
            form.email = email;
        }
        if let Some(role) = changes.role {
            form.role = role;
        }
        if let Some(password) = changes.password {
            dialog.set_password(&password);
        }
        self.employees.submit(&self.ctx, &mut dialog).await?;
        Ok(views::dialog_outcome(&dialog))
    }

    async fn run_projects(&self, command: ProjectsCommand) -> Result<String, Error> {
        match command {
            ProjectsCommand::List(filters) => self.project_list(&project_query(filters)).await,
            ProjectsCommand::Show { id } => self.project_detail(id).await,
            ProjectsCommand::Team { id } => {
                let roster = self.employees.project_roster(&self.ctx, id).await?;
                Ok(views::roster_table(&roster))
            }
            ProjectsCommand::New(args) => self.create_project(args).await,
            ProjectsCommand::Edit(args) => self.edit_project(args).await,
            ProjectsCommand::Delete { id } => {
                let next = self.projects.delete(&self.ctx, id).await?;
                Ok(format!("Project {id} deleted.\n{}", views::redirect(next)))
            }
            ProjectsCommand::DeleteDocument { id, document } => {
                let mut wizard = self.wizards.load_for_edit(&self.ctx, id).await?;
                self.wizards
                    .delete_document(&self.ctx, &mut wizard, document)
                    .await?;
                Ok(format!(
                    "Document {document} deleted.\n\n{}",
                    views::wizard_page(&wizard)
                ))
            }
        }
    }

    async fn project_list(&self, query: &ProjectQuery) -> Result<String, Error> {
        let projects = self.projects.list(&self.ctx, query).await?;
        Ok(views::project_table(&projects))
    }

    async fn project_detail(&self, id: ProjectId) -> Result<String, Error> {
        let detail = self.projects.detail(&self.ctx, id).await?;
        Ok(views::project_detail(&detail))
    }

    async fn create_project(&self, args: NewProjectArgs) -> Result<String, Error> {
        let mut wizard = self.wizards.start_create(&self.ctx)?;
        let form = wizard.form_mut();
        form.name = args.name;
        form.start_date = args.start_date;
        form.end_date = args.end_date;
        form.priority = args.priority;
        form.customer_company = args.customer;
        form.executor_company = args.executor;
        form.manager_id = Some(args.manager);
        for id in args.employees {
            include_employee(&mut wizard, id);
        }
        let note = attach_files(&mut wizard, &args.files)?;
        advance_to_last_step(&mut wizard)?;
        let next = self.wizards.submit(&self.ctx, &wizard).await?;
        Ok(format!("{note}Project created.\n{}", views::redirect(next)))
    }

    async fn edit_project(&self, args: EditProjectArgs) -> Result<String, Error> {
        let mut wizard = self.wizards.load_for_edit(&self.ctx, args.id).await?;
        let form = wizard.form_mut();
        let text_changes = [
            (&mut form.name, args.name),
            (&mut form.start_date, args.start_date),
            (&mut form.end_date, args.end_date),
            (&mut form.priority, args.priority),
            (&mut form.customer_company, args.customer),
            (&mut form.executor_company, args.executor),
        ];
        for (field, change) in text_changes {
            if let Some(value) = change {
                *field = value;
            }
        }
        if let Some(manager) = args.manager {
            form.manager_id = Some(manager);
        }
        for id in args.add_employees {
            include_employee(&mut wizard, id);
        }
        for id in args.remove_employees {
            exclude_employee(&mut wizard, id);
        }
        let note = attach_files(&mut wizard, &args.files)?;
        advance_to_last_step(&mut wizard)?;
        let next = self.wizards.submit(&self.ctx, &wizard).await?;
        Ok(format!("{note}Project updated.\n{}", views::redirect(next)))
    }

    async fn run_tasks(&self, command: TasksCommand) -> Result<String, Error> {
        match command {
            TasksCommand::List(filters) => self.task_list(&task_filter(filters)).await,
            TasksCommand::Show { id } => self.task_detail(id).await,
            TasksCommand::New(args) => self.create_task(args).await,
            TasksCommand::Edit(args) => self.edit_task(args).await,
            TasksCommand::Delete { id } => {
                let next = self.tasks.delete(&self.ctx, id).await?;
                Ok(format!("Task {id} deleted.\n{}", views::redirect(next)))
            }
            TasksCommand::Assignees { search } => {
                let found = self
                    .employees
                    .pick(&self.ctx, search.as_deref().unwrap_or_default())
                    .await?;
                Ok(views::employee_table(&found.iter().collect::<Vec<_>>()))
            }
        }
    }

    async fn task_list(&self, filter: &TaskFilter) -> Result<String, Error> {
        let tasks = self.tasks.list(&self.ctx, filter).await?;
        Ok(views::task_table(&tasks))
    }

    async fn task_detail(&self, id: TaskId) -> Result<String, Error> {
        let task = self.tasks.get(&self.ctx, id).await?;
        let actions = TaskActions {
            edit: self.ctx.can(Capability::EditTask(&task)),
            change_assignee: self.ctx.can(Capability::ChangeAssignee),
            delete: self.ctx.can(Capability::DeleteTask),
        };
        Ok(views::task_detail(&task, actions))
    }

    async fn new_task_page(&self, project_id: Option<ProjectId>) -> Result<String, Error> {
        let Some(id) = project_id else {
            if !self.ctx.can(Capability::CreateTask(None)) {
                return Err(Error::forbidden("You do not have permission to create tasks."));
            }
            return Ok(views::new_task_page(None));
        };
        let detail = self.projects.detail(&self.ctx, id).await?;
        if !detail.can_add_task {
            return Err(Error::forbidden(
                "You do not have permission to add tasks to this project.",
            ));
        }
        Ok(views::new_task_page(Some(&detail.project)))
    }

    async fn create_task(&self, args: NewTaskArgs) -> Result<String, Error> {
        let form = TaskForm {
            title: args.title,
            comment: args.comment,
            priority: args.priority,
            project_id: args.project,
            assignee_id: args.assignee,
        };
        let next = self.tasks.create(&self.ctx, form).await?;
        Ok(format!("Task created.\n{}", views::redirect(next)))
    }

    async fn edit_task(&self, args: EditTaskArgs) -> Result<String, Error> {
        let task = self.tasks.get(&self.ctx, args.id).await?;
        let mut edit = TaskEdit::from_task(&task);
        if let Some(title) = args.title {
            edit.title = title;
        }
        if let Some(comment) = args.comment {
            edit.comment = comment;
        }
        if let Some(priority) = args.priority {
            edit.priority = priority;
        }
        if let Some(status) = args.status {
            edit.status = status;
        }
        if args.assignee.is_some() {
            edit.assignee_id = args.assignee;
        }
        let next = self.tasks.update(&self.ctx, args.id, edit).await?;
        Ok(format!("Task updated.\n{}", views::redirect(next)))
    }
}

fn project_query(filters: ProjectFilters) -> ProjectQuery {
    ProjectQuery {
        start_from: filters.start_from,
        start_to: filters.start_to,
        priority: filters.priority,
        sort_by: filters.sort_by,
    }
}

fn task_filter(filters: TaskFilters) -> TaskFilter {
    TaskFilter {
        status: filters.status,
        search: filters.search,
        sort: filters.sort,
    }
}

fn include_employee(wizard: &mut ProjectWizard, id: EmployeeId) {
    if !wizard.form().employee_ids.contains(&id) {
        wizard.toggle_employee(id);
    }
}

fn exclude_employee(wizard: &mut ProjectWizard, id: EmployeeId) {
    if wizard.form().employee_ids.contains(&id) {
        wizard.toggle_employee(id);
    }
}

/// Attach files to the wizard; returns a note when some were dropped.
///
/// Only the paths that fit under [`MAX_ATTACHMENTS`] are read.
fn attach_files(
    wizard: &mut ProjectWizard,
    paths: &[std::path::PathBuf],
) -> Result<String, Error> {
    let room = MAX_ATTACHMENTS.saturating_sub(wizard.files().len());
    let (kept, dropped) = paths.split_at(room.min(paths.len()));
    let accepted = wizard.add_files(read_attachments(kept)?);
    if dropped.is_empty() {
        return Ok(String::new());
    }
    let offered = paths.len();
    warn!(offered, accepted, "attachment limit reached");
    Ok(format!(
        "Attached {accepted} of {offered} files; a project holds at most {MAX_ATTACHMENTS}.\n"
    ))
}

fn advance_to_last_step(wizard: &mut ProjectWizard) -> Result<(), Error> {
    while wizard.step().next().is_some() {
        wizard
            .next()
            .map_err(|err| Error::invalid_request(err.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
