//! `/Employees` endpoints.

use async_trait::async_trait;
use reqwest::Method;

use super::HttpApiClient;
use super::dto::{CreateEmployeeDto, EmployeeDto, EmployeeShortDto, UpdateEmployeeDto};
use crate::domain::ports::{ApiError, EmployeesApi};
use crate::domain::{Employee, EmployeeId, EmployeeShort, EmployeeUpdate, NewEmployee, ProjectId};

const EMPLOYEES: &str = "/Employees";

fn employee_path(id: EmployeeId) -> String {
    format!("{EMPLOYEES}/{id}")
}

#[async_trait]
impl EmployeesApi for HttpApiClient {
    async fn list(&self) -> Result<Vec<Employee>, ApiError> {
        let dtos: Vec<EmployeeDto> = self
            .execute_json(self.request(Method::GET, EMPLOYEES))
            .await?;
        Ok(dtos.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: EmployeeId) -> Result<Employee, ApiError> {
        let dto: EmployeeDto = self
            .execute_json(self.request(Method::GET, &employee_path(id)))
            .await?;
        Ok(dto.into())
    }

    async fn create(&self, employee: &NewEmployee) -> Result<Employee, ApiError> {
        let body = CreateEmployeeDto::from(employee);
        let dto: EmployeeDto = self
            .execute_json(self.json_request(Method::POST, EMPLOYEES, &body))
            .await?;
        Ok(dto.into())
    }

    async fn update(&self, id: EmployeeId, employee: &EmployeeUpdate) -> Result<(), ApiError> {
        let body = UpdateEmployeeDto::from(employee);
        self.execute_unit(self.json_request(Method::PUT, &employee_path(id), &body))
            .await
    }

    async fn delete(&self, id: EmployeeId) -> Result<(), ApiError> {
        self.execute_unit(self.request(Method::DELETE, &employee_path(id)))
            .await
    }

    async fn list_for_project(&self, project_id: ProjectId) -> Result<Vec<EmployeeShort>, ApiError> {
        let path = format!("{EMPLOYEES}/project/{project_id}");
        let dtos: Vec<EmployeeShortDto> = self
            .execute_json(self.request(Method::GET, &path))
            .await?;
        Ok(dtos.into_iter().map(Into::into).collect())
    }
}
