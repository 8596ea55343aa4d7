//! Port for the `/Tasks` endpoints.

use async_trait::async_trait;

use crate::domain::{EmployeeId, NewTask, ProjectId, Task, TaskId, TaskQuery, TaskUpdate};

use super::ApiError;

/// Task access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TasksApi: Send + Sync {
    /// Tasks visible to the caller.
    async fn list(&self, query: &TaskQuery) -> Result<Vec<Task>, ApiError>;

    /// One task.
    async fn get(&self, id: TaskId) -> Result<Task, ApiError>;

    /// Tasks of a project.
    async fn list_for_project(&self, project_id: ProjectId) -> Result<Vec<Task>, ApiError>;

    /// Tasks assigned to an employee.
    async fn list_for_assignee(&self, assignee_id: EmployeeId) -> Result<Vec<Task>, ApiError>;

    /// Create a task.
    async fn create(&self, task: &NewTask) -> Result<Task, ApiError>;

    /// Update a task.
    async fn update(&self, id: TaskId, task: &TaskUpdate) -> Result<(), ApiError>;

    /// Delete a task.
    async fn delete(&self, id: TaskId) -> Result<(), ApiError>;
}
