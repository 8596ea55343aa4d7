//! Port for the `/Projects` endpoints.

use async_trait::async_trait;

use crate::domain::{
    DocumentId, EmployeeId, NewProject, Project, ProjectId, ProjectQuery, ProjectUpdate,
};

use super::ApiError;

/// Project access, including roster and document management.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectsApi: Send + Sync {
    /// Projects visible to the caller, filtered server-side.
    async fn list(&self, query: &ProjectQuery) -> Result<Vec<Project>, ApiError>;

    /// One project.
    async fn get(&self, id: ProjectId) -> Result<Project, ApiError>;

    /// Create a project with its initial roster and files.
    async fn create(&self, project: &NewProject) -> Result<Project, ApiError>;

    /// Replace a project's scalar fields and upload additional files.
    async fn update(&self, id: ProjectId, project: &ProjectUpdate) -> Result<(), ApiError>;

    /// Delete a project.
    async fn delete(&self, id: ProjectId) -> Result<(), ApiError>;

    /// Add employees to the roster.
    async fn add_employees(
        &self,
        id: ProjectId,
        employee_ids: &[EmployeeId],
    ) -> Result<(), ApiError>;

    /// Remove employees from the roster.
    async fn remove_employees(
        &self,
        id: ProjectId,
        employee_ids: &[EmployeeId],
    ) -> Result<(), ApiError>;

    /// Delete an attached document.
    async fn delete_document(&self, id: ProjectId, document_id: DocumentId)
    -> Result<(), ApiError>;
}
