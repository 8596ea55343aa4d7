//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{
    DocumentId, EmployeeId, ProjectId, Role, Route, TaskId, TaskSort, TaskStatus,
};

/// `taskdesk` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskdesk",
    about = "Manage projects, tasks and employees from the terminal",
    version
)]
pub struct Cli {
    /// Base URL of the REST API. Overrides `TASKDESK_API_URL`.
    #[arg(long = "api-url", value_name = "url", global = true)]
    pub api_url: Option<String>,
    /// Directory holding the persisted session. Overrides
    /// `TASKDESK_SESSION_DIR`.
    #[arg(long = "session-dir", value_name = "path", global = true)]
    pub session_dir: Option<PathBuf>,
    /// Page or action to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in and remember the session.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Create an account and sign in.
    Register(RegisterArgs),
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user and the menu.
    Whoami,
    /// Open a page by path, for example `/projects/3` or `/employees`.
    Visit {
        /// Page path.
        path: Route,
    },
    /// Show the dashboard.
    Dashboard,
    /// Manage employees (Directors only).
    #[command(subcommand)]
    Employees(EmployeesCommand),
    /// Browse and manage projects.
    #[command(subcommand)]
    Projects(ProjectsCommand),
    /// Browse and manage tasks.
    #[command(subcommand)]
    Tasks(TasksCommand),
}

/// Self-registration fields.
#[derive(Debug, Clone, Args)]
pub struct RegisterArgs {
    /// Account email.
    #[arg(long)]
    pub email: String,
    /// Account password.
    #[arg(long)]
    pub password: String,
    /// Given name.
    #[arg(long = "first-name")]
    pub first_name: String,
    /// Family name.
    #[arg(long = "last-name")]
    pub last_name: String,
    /// Middle name.
    #[arg(long = "middle-name")]
    pub middle_name: Option<String>,
}

/// Employee management.
#[derive(Debug, Clone, Subcommand)]
pub enum EmployeesCommand {
    /// List employees, optionally filtered by name or email.
    List {
        /// Search term.
        #[arg(long)]
        search: Option<String>,
    },
    /// Add an employee.
    Add(EmployeeFields),
    /// Edit an employee. Omitted fields keep their current value.
    Edit {
        /// Employee id.
        id: EmployeeId,
        /// Fields to change.
        #[command(flatten)]
        changes: EmployeeChanges,
    },
    /// Delete an employee.
    Delete {
        /// Employee id.
        id: EmployeeId,
    },
}

/// Fields for a new employee.
#[derive(Debug, Clone, Args)]
pub struct EmployeeFields {
    /// Given name.
    #[arg(long = "first-name")]
    pub first_name: String,
    /// Family name.
    #[arg(long = "last-name")]
    pub last_name: String,
    /// Middle name.
    #[arg(long = "middle-name")]
    pub middle_name: Option<String>,
    /// Email.
    #[arg(long)]
    pub email: String,
    /// Initial password.
    #[arg(long)]
    pub password: String,
    /// Role: Director, ProjectManager or Developer.
    #[arg(long, default_value = "Developer")]
    pub role: Role,
}

/// Optional employee field changes.
#[derive(Debug, Clone, Default, Args)]
pub struct EmployeeChanges {
    /// Given name.
    #[arg(long = "first-name")]
    pub first_name: Option<String>,
    /// Family name.
    #[arg(long = "last-name")]
    pub last_name: Option<String>,
    /// Middle name; pass an empty value to clear it.
    #[arg(long = "middle-name")]
    pub middle_name: Option<String>,
    /// Email.
    #[arg(long)]
    pub email: Option<String>,
    /// New password.
    #[arg(long)]
    pub password: Option<String>,
    /// Role.
    #[arg(long)]
    pub role: Option<Role>,
}

/// Project commands.
#[derive(Debug, Clone, Subcommand)]
pub enum ProjectsCommand {
    /// List projects.
    List(ProjectFilters),
    /// Show a project and its tasks.
    Show {
        /// Project id.
        id: ProjectId,
    },
    /// List the employees assigned to a project.
    Team {
        /// Project id.
        id: ProjectId,
    },
    /// Create a project (Directors only).
    New(NewProjectArgs),
    /// Edit a project. Omitted fields keep their current value.
    Edit(EditProjectArgs),
    /// Delete a project (Directors only).
    Delete {
        /// Project id.
        id: ProjectId,
    },
    /// Delete a document attached to a project.
    DeleteDocument {
        /// Project id.
        id: ProjectId,
        /// Document id.
        #[arg(long)]
        document: DocumentId,
    },
}

/// Server-side project filters.
#[derive(Debug, Clone, Default, Args)]
pub struct ProjectFilters {
    /// Earliest start date, `YYYY-MM-DD`.
    #[arg(long = "start-from")]
    pub start_from: Option<NaiveDate>,
    /// Latest start date, `YYYY-MM-DD`.
    #[arg(long = "start-to")]
    pub start_to: Option<NaiveDate>,
    /// Exact priority.
    #[arg(long)]
    pub priority: Option<u8>,
    /// Backend sort key.
    #[arg(long = "sort-by")]
    pub sort_by: Option<String>,
}

/// Wizard fields for a new project.
#[derive(Debug, Clone, Args)]
pub struct NewProjectArgs {
    /// Project name.
    #[arg(long)]
    pub name: String,
    /// Start date, `YYYY-MM-DD`.
    #[arg(long = "start-date")]
    pub start_date: String,
    /// End date, `YYYY-MM-DD`.
    #[arg(long = "end-date")]
    pub end_date: String,
    /// Priority from 1 to 10.
    #[arg(long)]
    pub priority: String,
    /// Customer company.
    #[arg(long)]
    pub customer: String,
    /// Executor company.
    #[arg(long)]
    pub executor: String,
    /// Project manager's employee id.
    #[arg(long)]
    pub manager: EmployeeId,
    /// Employee to assign; repeatable.
    #[arg(long = "employee")]
    pub employees: Vec<EmployeeId>,
    /// File to attach; repeatable, at most ten are kept.
    #[arg(long = "file")]
    pub files: Vec<PathBuf>,
}

/// Wizard changes for an existing project.
#[derive(Debug, Clone, Args)]
pub struct EditProjectArgs {
    /// Project id.
    pub id: ProjectId,
    /// Project name.
    #[arg(long)]
    pub name: Option<String>,
    /// Start date, `YYYY-MM-DD`.
    #[arg(long = "start-date")]
    pub start_date: Option<String>,
    /// End date, `YYYY-MM-DD`.
    #[arg(long = "end-date")]
    pub end_date: Option<String>,
    /// Priority from 1 to 10.
    #[arg(long)]
    pub priority: Option<String>,
    /// Customer company.
    #[arg(long)]
    pub customer: Option<String>,
    /// Executor company.
    #[arg(long)]
    pub executor: Option<String>,
    /// Project manager's employee id.
    #[arg(long)]
    pub manager: Option<EmployeeId>,
    /// Employee to add to the roster; repeatable.
    #[arg(long = "add-employee")]
    pub add_employees: Vec<EmployeeId>,
    /// Employee to remove from the roster; repeatable.
    #[arg(long = "remove-employee")]
    pub remove_employees: Vec<EmployeeId>,
    /// File to attach; repeatable.
    #[arg(long = "file")]
    pub files: Vec<PathBuf>,
}

/// Task commands.
#[derive(Debug, Clone, Subcommand)]
pub enum TasksCommand {
    /// List tasks visible to you.
    List(TaskFilters),
    /// Show a task.
    Show {
        /// Task id.
        id: TaskId,
    },
    /// Create a task.
    New(NewTaskArgs),
    /// Edit a task. Omitted fields keep their current value.
    Edit(EditTaskArgs),
    /// Delete a task (Directors only).
    Delete {
        /// Task id.
        id: TaskId,
    },
    /// Find employees to assign tasks to.
    Assignees {
        /// Name or email to match.
        #[arg(long)]
        search: Option<String>,
    },
}

/// Client-side task filters.
#[derive(Debug, Clone, Default, Args)]
pub struct TaskFilters {
    /// Keep only this status: ToDo, InProgress or Done.
    #[arg(long)]
    pub status: Option<TaskStatus>,
    /// Match title, comment or assignee.
    #[arg(long)]
    pub search: Option<String>,
    /// priority, priority_desc, title, title_desc, status or status_desc.
    #[arg(long, default_value = "priority")]
    pub sort: TaskSort,
}

/// Fields for a new task.
#[derive(Debug, Clone, Args)]
pub struct NewTaskArgs {
    /// Project the task belongs to.
    #[arg(long)]
    pub project: Option<ProjectId>,
    /// Title.
    #[arg(long)]
    pub title: String,
    /// Comment.
    #[arg(long, default_value = "")]
    pub comment: String,
    /// Priority from 1 to 10.
    #[arg(long)]
    pub priority: String,
    /// Assignee's employee id.
    #[arg(long)]
    pub assignee: Option<EmployeeId>,
}

/// Changes to an existing task.
#[derive(Debug, Clone, Args)]
pub struct EditTaskArgs {
    /// Task id.
    pub id: TaskId,
    /// Title.
    #[arg(long)]
    pub title: Option<String>,
    /// Comment.
    #[arg(long)]
    pub comment: Option<String>,
    /// Priority from 1 to 10.
    #[arg(long)]
    pub priority: Option<String>,
    /// Status: ToDo, InProgress or Done.
    #[arg(long)]
    pub status: Option<TaskStatus>,
    /// Assignee's employee id.
    #[arg(long)]
    pub assignee: Option<EmployeeId>,
}

impl Command {
    /// Page the command renders, checked by the gate before it runs.
    /// `None` for commands that work regardless of the session.
    #[must_use]
    pub fn route(&self) -> Option<Route> {
        let route = match self {
            Self::Logout => return None,
            Self::Login { .. } | Self::Register(_) => Route::Login,
            Self::Whoami | Self::Dashboard => Route::Dashboard,
            Self::Visit { path } => *path,
            Self::Employees(_) => Route::Employees,
            Self::Projects(command) => match command {
                ProjectsCommand::List(_) => Route::Projects,
                ProjectsCommand::Show { id }
                | ProjectsCommand::Team { id }
                | ProjectsCommand::Delete { id } => Route::Project(*id),
                ProjectsCommand::New(_) => Route::NewProject,
                ProjectsCommand::Edit(args) => Route::EditProject(args.id),
                ProjectsCommand::DeleteDocument { id, .. } => Route::EditProject(*id),
            },
            Self::Tasks(command) => match command {
                TasksCommand::List(_) | TasksCommand::Assignees { .. } => Route::Tasks,
                TasksCommand::New(args) => Route::NewTask {
                    project_id: args.project,
                },
                TasksCommand::Show { id } | TasksCommand::Delete { id } => Route::Task(*id),
                TasksCommand::Edit(args) => Route::Task(args.id),
            },
        };
        Some(route)
    }
}
