//! Port for the `/Employees` endpoints.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeId, EmployeeShort, EmployeeUpdate, NewEmployee, ProjectId};

use super::ApiError;

/// Employee directory access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeesApi: Send + Sync {
    /// Every employee.
    async fn list(&self) -> Result<Vec<Employee>, ApiError>;

    /// One employee.
    async fn get(&self, id: EmployeeId) -> Result<Employee, ApiError>;

    /// Create an employee.
    async fn create(&self, employee: &NewEmployee) -> Result<Employee, ApiError>;

    /// Replace an employee's fields.
    async fn update(&self, id: EmployeeId, employee: &EmployeeUpdate) -> Result<(), ApiError>;

    /// Delete an employee.
    async fn delete(&self, id: EmployeeId) -> Result<(), ApiError>;

    /// Employees assigned to a project.
    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<EmployeeShort>, ApiError>;
}
