//! Command-line interface.
//!
//! Each command is a page: the persisted session is loaded first, the page
//! gate runs next, and only then does the command reach a service.

mod args;
mod attachments;
mod shell;
pub mod views;

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};

pub use args::{
    Cli, Command, EditProjectArgs, EditTaskArgs, EmployeeChanges, EmployeeFields,
    EmployeesCommand, NewProjectArgs, NewTaskArgs, ProjectFilters, ProjectsCommand, RegisterArgs,
    TaskFilters, TasksCommand,
};
pub use shell::Shell;

use crate::config::ClientSettings;
use crate::domain::AppContext;
use crate::outbound::http::HttpApiClient;
use crate::outbound::session::LocalStorageSessionRepository;

/// Load the session, wire the adapters and run `command`.
///
/// # Errors
///
/// Returns an error when configuration is invalid, the session directory
/// cannot be opened or the command fails.
pub async fn execute(command: Command, settings: &ClientSettings) -> Result<String> {
    let session_dir = settings.session_dir();
    let sessions = Arc::new(
        LocalStorageSessionRepository::open(&session_dir)
            .wrap_err_with(|| format!("open session store at '{}'", session_dir.display()))?,
    );
    let mut ctx = AppContext::new();
    ctx.hydrate(sessions.as_ref()).await;

    let client = HttpApiClient::new(
        settings.api_url()?,
        settings.request_timeout(),
        settings.accept_invalid_certs,
    )
    .wrap_err("build HTTP client")?
    .with_token(ctx.token());

    let mut shell = Shell::new(ctx, Arc::new(client), sessions);
    Ok(shell.run(command).await?)
}
