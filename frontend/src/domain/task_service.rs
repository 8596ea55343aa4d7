//! Task list, detail, creation, editing and deletion.

use std::sync::Arc;

use tracing::info;

use super::ports::{ProjectsApi, TasksApi};
use super::service_support::{api_failure, require, signed_in};
use super::{
    AppContext, Capability, Error, Role, Route, Task, TaskEdit, TaskFilter, TaskForm,
    TaskFormError, TaskId, TaskQuery,
};

const FETCH_FAILED: &str = "Failed to fetch task";

fn map_form_error(error: TaskFormError) -> Error {
    Error::invalid_request(error.to_string())
}

/// Task operations.
#[derive(Clone)]
pub struct TaskService<T, P> {
    tasks: Arc<T>,
    projects: Arc<P>,
}

impl<T, P> TaskService<T, P> {
    /// Create the service from its ports.
    pub fn new(tasks: Arc<T>, projects: Arc<P>) -> Self {
        Self { tasks, projects }
    }
}

impl<T, P> TaskService<T, P>
where
    T: TasksApi,
    P: ProjectsApi,
{
    /// Tasks visible to the user, filtered and sorted client-side.
    ///
    /// Directors and project managers see every task; employees see the
    /// tasks assigned to them.
    ///
    /// # Errors
    ///
    /// Unauthorized when signed out; otherwise the mapped API failure.
    pub async fn list(&self, ctx: &AppContext, filter: &TaskFilter) -> Result<Vec<Task>, Error> {
        let user = signed_in(ctx)?;
        let fetched = match user.role {
            Role::Director | Role::ProjectManager => {
                self.tasks.list(&TaskQuery::default()).await
            }
            Role::Employee => self.tasks.list_for_assignee(user.id).await,
        }
        .map_err(api_failure("list tasks", "Failed to load tasks."))?;
        Ok(filter.apply(fetched))
    }

    /// One task.
    ///
    /// # Errors
    ///
    /// Unauthorized when signed out; otherwise the mapped API failure.
    pub async fn get(&self, ctx: &AppContext, id: TaskId) -> Result<Task, Error> {
        signed_in(ctx)?;
        self.tasks
            .get(id)
            .await
            .map_err(api_failure("get task", FETCH_FAILED))
    }

    /// Create a task authored by the signed-in user and return the owning
    /// project's page.
    ///
    /// # Errors
    ///
    /// Invalid for an incomplete form, forbidden unless the user manages the
    /// project, otherwise the mapped API failure.
    pub async fn create(&self, ctx: &AppContext, form: TaskForm) -> Result<Route, Error> {
        let user = signed_in(ctx)?;
        let new_task = form.into_new_task(user.id).map_err(map_form_error)?;
        let project = self
            .projects
            .get(new_task.project_id)
            .await
            .map_err(api_failure("load project", "Failed to load project."))?;
        require(
            ctx,
            Capability::CreateTask(Some(&project)),
            "You do not have permission to add tasks to this project.",
        )?;
        let created = self
            .tasks
            .create(&new_task)
            .await
            .map_err(api_failure("create task", "Failed to create task"))?;
        info!(task_id = %created.id, project_id = %project.id, "task created");
        Ok(Route::Project(project.id))
    }

    /// Save an edited task and return the owning project's page.
    ///
    /// # Errors
    ///
    /// Forbidden when the user may not edit the task or changes the assignee
    /// without permission, invalid for a bad form, otherwise the mapped API
    /// failure.
    pub async fn update(&self, ctx: &AppContext, id: TaskId, edit: TaskEdit) -> Result<Route, Error> {
        let task = self.get(ctx, id).await?;
        require(
            ctx,
            Capability::EditTask(&task),
            "You do not have permission to edit this task.",
        )?;
        if edit.assignee_id != task.assignee_id {
            require(
                ctx,
                Capability::ChangeAssignee,
                "Only Directors and Project Managers can change the assignee.",
            )?;
        }
        let update = edit.into_update().map_err(map_form_error)?;
        self.tasks
            .update(id, &update)
            .await
            .map_err(api_failure("update task", "Failed to update task"))?;
        info!(task_id = %id, "task updated");
        Ok(Route::Project(task.project_id))
    }

    /// Delete a task and return the owning project's page.
    ///
    /// # Errors
    ///
    /// Forbidden for non-Directors; otherwise the mapped API failure.
    pub async fn delete(&self, ctx: &AppContext, id: TaskId) -> Result<Route, Error> {
        require(ctx, Capability::DeleteTask, "Only Directors can delete tasks.")?;
        let task = self.get(ctx, id).await?;
        self.tasks
            .delete(id)
            .await
            .map_err(api_failure("delete task", "Failed to delete task"))?;
        info!(task_id = %id, "task deleted");
        Ok(Route::Project(task.project_id))
    }
}

#[cfg(test)]
#[path = "task_service_tests.rs"]
mod tests;
