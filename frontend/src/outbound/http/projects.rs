//! `/Projects` endpoints.
//!
//! Create and update go out as `multipart/form-data` when attachments are
//! present and as JSON otherwise.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use super::HttpApiClient;
use super::dto::{CreateProjectDto, EmployeeIdsDto, ProjectDto, ProjectFieldsDto};
use crate::domain::ports::{ApiError, ProjectsApi};
use crate::domain::{
    Attachment, DocumentId, EmployeeId, NewProject, Project, ProjectId, ProjectQuery,
    ProjectUpdate,
};

const PROJECTS: &str = "/Projects";

fn project_path(id: ProjectId) -> String {
    format!("{PROJECTS}/{id}")
}

fn project_form(
    fields: &ProjectFieldsDto<'_>,
    employee_ids: &[EmployeeId],
    files: &[Attachment],
) -> Form {
    let text_parts = fields
        .form_fields()
        .into_iter()
        .chain(employee_ids.iter().map(|id| ("employeeIds", id.to_string())));
    let form = text_parts.fold(Form::new(), |acc, (name, value)| acc.text(name, value));
    files.iter().fold(form, |acc, file| {
        let part = Part::bytes(file.bytes.clone()).file_name(file.file_name.clone());
        acc.part("files", part)
    })
}

#[async_trait]
impl ProjectsApi for HttpApiClient {
    async fn list(&self, query: &ProjectQuery) -> Result<Vec<Project>, ApiError> {
        let dtos: Vec<ProjectDto> = self
            .execute_json(self.request(Method::GET, PROJECTS).query(&query.to_pairs()))
            .await?;
        Ok(dtos.into_iter().map(Into::into).collect())
    }

    async fn get(&self, id: ProjectId) -> Result<Project, ApiError> {
        let dto: ProjectDto = self
            .execute_json(self.request(Method::GET, &project_path(id)))
            .await?;
        Ok(dto.into())
    }

    async fn create(&self, project: &NewProject) -> Result<Project, ApiError> {
        let fields = ProjectFieldsDto::from(&project.fields);
        let request = if project.files.is_empty() {
            let body = CreateProjectDto {
                fields,
                employee_ids: &project.employee_ids,
            };
            self.json_request(Method::POST, PROJECTS, &body)
        } else {
            let form = project_form(&fields, &project.employee_ids, &project.files);
            self.request(Method::POST, PROJECTS).multipart(form)
        };
        let dto: ProjectDto = self.execute_json(request).await?;
        Ok(dto.into())
    }

    async fn update(&self, id: ProjectId, project: &ProjectUpdate) -> Result<(), ApiError> {
        let fields = ProjectFieldsDto::from(&project.fields);
        let path = project_path(id);
        let request = if project.files.is_empty() {
            self.json_request(Method::PUT, &path, &fields)
        } else {
            let form = project_form(&fields, &[], &project.files);
            self.request(Method::PUT, &path).multipart(form)
        };
        self.execute_unit(request).await
    }

    async fn delete(&self, id: ProjectId) -> Result<(), ApiError> {
        self.execute_unit(self.request(Method::DELETE, &project_path(id)))
            .await
    }

    async fn add_employees(
        &self,
        id: ProjectId,
        employee_ids: &[EmployeeId],
    ) -> Result<(), ApiError> {
        let path = format!("{PROJECTS}/{id}/employees");
        let body = EmployeeIdsDto { employee_ids };
        self.execute_unit(self.json_request(Method::POST, &path, &body))
            .await
    }

    async fn remove_employees(
        &self,
        id: ProjectId,
        employee_ids: &[EmployeeId],
    ) -> Result<(), ApiError> {
        let path = format!("{PROJECTS}/{id}/employees");
        let body = EmployeeIdsDto { employee_ids };
        self.execute_unit(self.json_request(Method::DELETE, &path, &body))
            .await
    }

    async fn delete_document(
        &self,
        id: ProjectId,
        document_id: DocumentId,
    ) -> Result<(), ApiError> {
        let path = format!("{PROJECTS}/{id}/documents/{document_id}");
        self.execute_unit(self.request(Method::DELETE, &path)).await
    }
}
