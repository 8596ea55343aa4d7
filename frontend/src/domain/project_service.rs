//! Project list, detail and deletion.

use std::sync::Arc;

use futures_util::future::try_join;
use tracing::info;

use super::ports::{ProjectsApi, TasksApi};
use super::service_support::{api_failure, require, signed_in};
use super::{AppContext, Capability, Error, Project, ProjectId, ProjectQuery, Route, Task};

const LOAD_FAILED: &str = "Failed to load project.";

/// A project with its tasks and what the viewer may do with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetail {
    /// The project.
    pub project: Project,
    /// Its tasks.
    pub tasks: Vec<Task>,
    /// Whether the viewer may open the edit wizard.
    pub can_edit: bool,
    /// Whether the viewer may delete the project.
    pub can_delete: bool,
    /// Whether the viewer may add tasks.
    pub can_add_task: bool,
}

/// Read and delete projects.
#[derive(Clone)]
pub struct ProjectService<P, T> {
    projects: Arc<P>,
    tasks: Arc<T>,
}

impl<P, T> ProjectService<P, T> {
    /// Create the service from its ports.
    pub fn new(projects: Arc<P>, tasks: Arc<T>) -> Self {
        Self { projects, tasks }
    }
}

impl<P, T> ProjectService<P, T>
where
    P: ProjectsApi,
    T: TasksApi,
{
    /// Projects matching `query`. A 403 from the backend yields an empty list.
    ///
    /// # Errors
    ///
    /// Unauthorized when signed out; otherwise the mapped API failure.
    pub async fn list(&self, ctx: &AppContext, query: &ProjectQuery) -> Result<Vec<Project>, Error> {
        signed_in(ctx)?;
        match self.projects.list(query).await {
            Ok(projects) => Ok(projects),
            Err(err) if err.is_forbidden() => {
                info!("project list forbidden for this user; showing none");
                Ok(Vec::new())
            }
            Err(err) => Err(api_failure("list projects", "Failed to load projects.")(err)),
        }
    }

    /// Project and its tasks, fetched concurrently.
    ///
    /// # Errors
    ///
    /// Unauthorized when signed out; otherwise the first API failure.
    pub async fn detail(&self, ctx: &AppContext, id: ProjectId) -> Result<ProjectDetail, Error> {
        signed_in(ctx)?;
        let (project, tasks) = try_join(self.projects.get(id), self.tasks.list_for_project(id))
            .await
            .map_err(api_failure("load project", LOAD_FAILED))?;
        Ok(ProjectDetail {
            can_edit: ctx.can(Capability::ManageProject(&project)),
            can_delete: ctx.can(Capability::DeleteProject),
            can_add_task: ctx.can(Capability::CreateTask(Some(&project))),
            project,
            tasks,
        })
    }

    /// Delete a project and return the page to show next.
    ///
    /// # Errors
    ///
    /// Forbidden for non-Directors; otherwise the mapped API failure.
    pub async fn delete(&self, ctx: &AppContext, id: ProjectId) -> Result<Route, Error> {
        require(ctx, Capability::DeleteProject, "Only Directors can delete projects.")?;
        self.projects
            .delete(id)
            .await
            .map_err(api_failure("delete project", "Failed to delete project."))?;
        info!(project_id = %id, "project deleted");
        Ok(Route::Projects)
    }
}

#[cfg(test)]
#[path = "project_service_tests.rs"]
mod tests;
