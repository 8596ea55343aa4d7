//! Employee management and employee pickers.
//!
//! Managing the directory is Director-only and is refused before any API
//! call. Pickers (manager, assignee) are open to every signed-in user.

use std::sync::Arc;

use tracing::info;

use super::ports::EmployeesApi;
use super::service_support::{api_failure, require, signed_in};
use super::{
    AppContext, Capability, Employee, EmployeeDialog, EmployeeId, EmployeeShort,
    EmployeeSubmission, Error, ProjectId, Route, search_employees,
};

const LOAD_FAILED: &str = "Failed to load employees.";

/// Employee directory operations.
#[derive(Clone)]
pub struct EmployeeDirectoryService<E> {
    api: Arc<E>,
}

impl<E> EmployeeDirectoryService<E> {
    /// Create the service from the employees port.
    pub fn new(api: Arc<E>) -> Self {
        Self { api }
    }
}

fn require_director(ctx: &AppContext) -> Result<(), Error> {
    require(ctx, Capability::ManageEmployees, Route::Employees.denial_message())
}

impl<E> EmployeeDirectoryService<E>
where
    E: EmployeesApi,
{
    /// Every employee, for the management table.
    ///
    /// # Errors
    ///
    /// Forbidden for non-Directors; otherwise the mapped API failure.
    pub async fn list(&self, ctx: &AppContext) -> Result<Vec<Employee>, Error> {
        require_director(ctx)?;
        self.api
            .list()
            .await
            .map_err(api_failure("list employees", LOAD_FAILED))
    }

    /// Validate the dialog and send its create or update.
    ///
    /// The outcome is recorded on the dialog as well as returned.
    ///
    /// # Errors
    ///
    /// Forbidden for non-Directors, invalid when the dialog does not
    /// validate, otherwise the mapped API failure.
    pub async fn submit(&self, ctx: &AppContext, dialog: &mut EmployeeDialog) -> Result<(), Error> {
        if let Err(err) = require_director(ctx) {
            dialog.fail(err.message());
            return Err(err);
        }
        let Some(submission) = dialog.submit() else {
            return Err(Error::invalid_request(
                dialog.error().unwrap_or("Invalid employee details."),
            ));
        };
        let outcome = match &submission {
            EmployeeSubmission::Create(employee) => self
                .api
                .create(employee)
                .await
                .map(|created| {
                    info!(employee_id = %created.id, "employee created");
                    "Employee created successfully."
                })
                .map_err(api_failure("create employee", "Failed to create employee.")),
            EmployeeSubmission::Update(id, employee) => self
                .api
                .update(*id, employee)
                .await
                .map(|()| {
                    info!(employee_id = %id, "employee updated");
                    "Employee updated successfully."
                })
                .map_err(api_failure("update employee", "Failed to update employee.")),
        };
        match outcome {
            Ok(message) => {
                dialog.succeed(message);
                Ok(())
            }
            Err(err) => {
                dialog.fail(err.message());
                Err(err)
            }
        }
    }

    /// Delete an employee.
    ///
    /// # Errors
    ///
    /// Forbidden for non-Directors; otherwise the mapped API failure.
    pub async fn delete(&self, ctx: &AppContext, id: EmployeeId) -> Result<(), Error> {
        require_director(ctx)?;
        self.api
            .delete(id)
            .await
            .map_err(api_failure("delete employee", "Failed to delete employee."))?;
        info!(employee_id = %id, "employee deleted");
        Ok(())
    }

    /// One employee, for prefilling the edit dialog.
    ///
    /// # Errors
    ///
    /// Forbidden for non-Directors; otherwise the mapped API failure.
    pub async fn get(&self, ctx: &AppContext, id: EmployeeId) -> Result<Employee, Error> {
        require_director(ctx)?;
        self.api
            .get(id)
            .await
            .map_err(api_failure("get employee", "Failed to load employee."))
    }

    /// Employees matching `term`, for manager and assignee pickers.
    ///
    /// # Errors
    ///
    /// Unauthorized when signed out; otherwise the mapped API failure.
    pub async fn pick(&self, ctx: &AppContext, term: &str) -> Result<Vec<Employee>, Error> {
        signed_in(ctx)?;
        let employees = self
            .api
            .list()
            .await
            .map_err(api_failure("list employees", LOAD_FAILED))?;
        Ok(search_employees(&employees, term)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Employees assigned to a project.
    ///
    /// # Errors
    ///
    /// Unauthorized when signed out; otherwise the mapped API failure.
    pub async fn project_roster(
        &self,
        ctx: &AppContext,
        project_id: ProjectId,
    ) -> Result<Vec<EmployeeShort>, Error> {
        signed_in(ctx)?;
        self.api
            .list_for_project(project_id)
            .await
            .map_err(api_failure("list project employees", LOAD_FAILED))
    }
}

#[cfg(test)]
#[path = "employee_directory_service_tests.rs"]
mod tests;
