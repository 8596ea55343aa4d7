//! Role-dependent landing page data.

use std::collections::HashSet;
use std::sync::Arc;

use futures_util::future::{try_join, try_join_all};

use super::ports::{ProjectsApi, TasksApi};
use super::service_support::{api_failure, signed_in};
use super::{AppContext, Error, Project, ProjectQuery, Role, Task, TaskQuery, User};

/// Number of projects and tasks shown on the dashboard.
pub const DASHBOARD_LIMIT: usize = 5;

const LOAD_FAILED: &str = "Failed to load dashboard.";

/// What the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    /// The signed-in user.
    pub user: User,
    /// Up to [`DASHBOARD_LIMIT`] projects.
    pub projects: Vec<Project>,
    /// Up to [`DASHBOARD_LIMIT`] tasks.
    pub tasks: Vec<Task>,
}

/// Builds the dashboard for the signed-in user.
#[derive(Clone)]
pub struct DashboardService<P, T> {
    projects: Arc<P>,
    tasks: Arc<T>,
}

impl<P, T> DashboardService<P, T> {
    /// Create the service from its ports.
    pub fn new(projects: Arc<P>, tasks: Arc<T>) -> Self {
        Self { projects, tasks }
    }
}

impl<P, T> DashboardService<P, T>
where
    P: ProjectsApi,
    T: TasksApi,
{
    /// Directors see all projects and tasks, project managers the projects
    /// they manage and all tasks, employees their tasks and those tasks'
    /// projects.
    ///
    /// # Errors
    ///
    /// Unauthorized when signed out; otherwise the first API failure.
    pub async fn overview(&self, ctx: &AppContext) -> Result<Dashboard, Error> {
        let user = signed_in(ctx)?.clone();
        let (projects, tasks) = match user.role {
            Role::Director => self.everything().await?,
            Role::ProjectManager => {
                let (projects, tasks) = self.everything().await?;
                let managed = projects
                    .into_iter()
                    .filter(|project| project.manager_id == user.id)
                    .collect();
                (managed, tasks)
            }
            Role::Employee => self.assigned_to(&user).await?,
        };
        Ok(Dashboard {
            user,
            projects: projects.into_iter().take(DASHBOARD_LIMIT).collect(),
            tasks: tasks.into_iter().take(DASHBOARD_LIMIT).collect(),
        })
    }

    async fn everything(&self) -> Result<(Vec<Project>, Vec<Task>), Error> {
        let query = ProjectQuery::default();
        let task_query = TaskQuery::default();
        try_join(self.projects.list(&query), self.tasks.list(&task_query))
            .await
            .map_err(api_failure("load dashboard", LOAD_FAILED))
    }

    async fn assigned_to(&self, user: &User) -> Result<(Vec<Project>, Vec<Task>), Error> {
        let tasks = self
            .tasks
            .list_for_assignee(user.id)
            .await
            .map_err(api_failure("load dashboard tasks", LOAD_FAILED))?;
        let mut seen = HashSet::new();
        let project_ids: Vec<_> = tasks
            .iter()
            .map(|task| task.project_id)
            .filter(|id| seen.insert(*id))
            .collect();
        let projects = try_join_all(project_ids.into_iter().map(|id| self.projects.get(id)))
            .await
            .map_err(api_failure("load dashboard projects", LOAD_FAILED))?;
        Ok((projects, tasks))
    }
}

#[cfg(test)]
#[path = "dashboard_service_tests.rs"]
mod tests;
