//! Wire DTOs for the REST backend.
//!
//! Responses decode into these transport types first and are mapped into
//! domain records in one pass. Requests borrow from the domain payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{
    AuthSession, DocumentId, Employee, EmployeeId, EmployeeShort, EmployeeUpdate, NewEmployee,
    NewTask, Project, ProjectDocument, ProjectFields, ProjectId, Role, Task, TaskId, TaskStatus,
    TaskUpdate, User,
};

/// `YYYY-MM-DD` as an ISO-8601 UTC midnight timestamp.
pub(super) fn wire_date(date: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AuthResponseDto {
    pub(super) access_token: String,
    pub(super) user: UserDto,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserDto {
    id: EmployeeId,
    email: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(deserialize_with = "lenient_role")]
    role: Role,
}

impl AuthResponseDto {
    pub(super) fn into_domain(self) -> Result<AuthSession, String> {
        if self.access_token.trim().is_empty() {
            return Err("auth response carried an empty access token".to_owned());
        }
        let user = User {
            id: self.user.id,
            email: self.user.email,
            first_name: self.user.first_name,
            last_name: self.user.last_name,
            role: self.user.role,
        };
        Ok(AuthSession::new(self.access_token, user))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EmployeeDto {
    id: EmployeeId,
    first_name: String,
    last_name: String,
    #[serde(default)]
    middle_name: Option<String>,
    email: String,
    #[serde(deserialize_with = "lenient_role")]
    role: Role,
}

impl From<EmployeeDto> for Employee {
    fn from(dto: EmployeeDto) -> Self {
        Self {
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            middle_name: dto.middle_name.filter(|name| !name.trim().is_empty()),
            email: dto.email,
            role: dto.role,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EmployeeShortDto {
    id: EmployeeId,
    #[serde(default)]
    full_name: String,
    #[serde(deserialize_with = "lenient_role")]
    role: Role,
}

impl From<EmployeeShortDto> for EmployeeShort {
    fn from(dto: EmployeeShortDto) -> Self {
        Self {
            id: dto.id,
            full_name: dto.full_name,
            role: dto.role,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProjectDocumentDto {
    id: DocumentId,
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProjectDto {
    id: ProjectId,
    name: String,
    #[serde(default)]
    customer_company: String,
    #[serde(default)]
    executor_company: String,
    start_date: String,
    end_date: String,
    priority: i32,
    manager_id: EmployeeId,
    #[serde(default)]
    manager_full_name: Option<String>,
    #[serde(default)]
    employees: Vec<EmployeeShortDto>,
    #[serde(default)]
    tasks_count: u32,
    #[serde(default)]
    documents: Vec<ProjectDocumentDto>,
}

impl From<ProjectDto> for Project {
    fn from(dto: ProjectDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            customer_company: dto.customer_company,
            executor_company: dto.executor_company,
            start_date: dto.start_date,
            end_date: dto.end_date,
            priority: dto.priority,
            manager_id: dto.manager_id,
            manager_full_name: dto.manager_full_name.unwrap_or_default(),
            employees: dto.employees.into_iter().map(Into::into).collect(),
            tasks_count: dto.tasks_count,
            documents: dto
                .documents
                .into_iter()
                .map(|doc| ProjectDocument {
                    id: doc.id,
                    file_name: doc.file_name,
                    url: doc.url,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TaskDto {
    id: TaskId,
    title: String,
    #[serde(default)]
    comment: Option<String>,
    priority: i32,
    status: TaskStatus,
    author_id: EmployeeId,
    #[serde(default)]
    author_full_name: Option<String>,
    #[serde(default)]
    assignee_id: Option<EmployeeId>,
    #[serde(default)]
    assignee_full_name: Option<String>,
    project_id: ProjectId,
}

impl From<TaskDto> for Task {
    fn from(dto: TaskDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            comment: dto.comment.unwrap_or_default(),
            priority: dto.priority,
            status: dto.status,
            author_id: dto.author_id,
            author_full_name: dto.author_full_name,
            assignee_id: dto.assignee_id,
            assignee_full_name: dto.assignee_full_name,
            project_id: dto.project_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct LoginDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RegisterDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
    pub(super) first_name: &'a str,
    pub(super) last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) middle_name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateEmployeeDto<'a> {
    first_name: &'a str,
    last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    middle_name: Option<&'a str>,
    email: &'a str,
    password: &'a str,
    role: &'static str,
}

impl<'a> From<&'a NewEmployee> for CreateEmployeeDto<'a> {
    fn from(employee: &'a NewEmployee) -> Self {
        Self {
            first_name: &employee.first_name,
            last_name: &employee.last_name,
            middle_name: employee.middle_name.as_deref(),
            email: &employee.email,
            password: employee.password.as_str(),
            role: employee.role.as_staff_str(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateEmployeeDto<'a> {
    first_name: &'a str,
    last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    middle_name: Option<&'a str>,
    email: &'a str,
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
}

impl<'a> From<&'a EmployeeUpdate> for UpdateEmployeeDto<'a> {
    fn from(employee: &'a EmployeeUpdate) -> Self {
        Self {
            first_name: &employee.first_name,
            last_name: &employee.last_name,
            middle_name: employee.middle_name.as_deref(),
            email: &employee.email,
            role: employee.role.as_staff_str(),
            password: employee.password.as_ref().map(|secret| secret.as_str()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProjectFieldsDto<'a> {
    name: &'a str,
    customer_company: &'a str,
    executor_company: &'a str,
    start_date: String,
    end_date: String,
    priority: u8,
    manager_id: EmployeeId,
}

impl<'a> From<&'a ProjectFields> for ProjectFieldsDto<'a> {
    fn from(fields: &'a ProjectFields) -> Self {
        Self {
            name: &fields.name,
            customer_company: &fields.customer_company,
            executor_company: &fields.executor_company,
            start_date: wire_date(fields.start_date),
            end_date: wire_date(fields.end_date),
            priority: fields.priority,
            manager_id: fields.manager_id,
        }
    }
}

impl ProjectFieldsDto<'_> {
    /// Text parts for `multipart/form-data`, in field order.
    pub(super) fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.to_owned()),
            ("customerCompany", self.customer_company.to_owned()),
            ("executorCompany", self.executor_company.to_owned()),
            ("startDate", self.start_date.clone()),
            ("endDate", self.end_date.clone()),
            ("priority", self.priority.to_string()),
            ("managerId", self.manager_id.to_string()),
        ]
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateProjectDto<'a> {
    #[serde(flatten)]
    pub(super) fields: ProjectFieldsDto<'a>,
    pub(super) employee_ids: &'a [EmployeeId],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EmployeeIdsDto<'a> {
    pub(super) employee_ids: &'a [EmployeeId],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateTaskDto {
    title: String,
    comment: String,
    priority: u8,
    project_id: ProjectId,
    author_id: EmployeeId,
    assignee_id: EmployeeId,
}

impl From<&NewTask> for CreateTaskDto {
    fn from(task: &NewTask) -> Self {
        Self {
            title: task.title.clone(),
            comment: task.comment.clone(),
            priority: task.priority,
            project_id: task.project_id,
            author_id: task.author_id,
            assignee_id: task.assignee_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UpdateTaskDto<'a> {
    title: &'a str,
    comment: &'a str,
    priority: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee_id: Option<EmployeeId>,
}

impl<'a> From<&'a TaskUpdate> for UpdateTaskDto<'a> {
    fn from(task: &'a TaskUpdate) -> Self {
        Self {
            title: &task.title,
            comment: &task.comment,
            priority: task.priority,
            status: task.status,
            assignee_id: task.assignee_id,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Decoding and encoding against backend-shaped JSON.

    use rstest::rstest;
    use serde_json::json;
    use zeroize::Zeroizing;

    use super::*;

    #[rstest]
    fn dates_are_sent_as_utc_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date");
        assert_eq!(wire_date(date), "2024-03-09T00:00:00.000Z");
    }

    #[rstest]
    #[case("Developer", Role::Employee)]
    #[case("Employee", Role::Employee)]
    #[case("ProjectManager", Role::ProjectManager)]
    #[case("director", Role::Director)]
    fn employee_roles_decode_leniently(#[case] wire: &str, #[case] expected: Role) {
        let dto: EmployeeDto = serde_json::from_value(json!({
            "id": 3,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "middleName": "",
            "email": "ada@example.com",
            "role": wire,
        }))
        .expect("employee decodes");
        let employee = Employee::from(dto);
        assert_eq!(employee.role, expected);
        assert_eq!(employee.middle_name, None);
    }

    #[rstest]
    fn project_decodes_with_missing_optional_lists() {
        let dto: ProjectDto = serde_json::from_value(json!({
            "id": 5,
            "name": "Apollo",
            "customerCompany": "NASA",
            "executorCompany": "Grumman",
            "startDate": "2024-01-01T00:00:00",
            "endDate": "2024-12-31T00:00:00",
            "priority": 1,
            "managerId": 2,
            "managerFullName": "Pat Manager",
        }))
        .expect("project decodes");
        let project = Project::from(dto);
        assert!(project.employees.is_empty());
        assert!(project.documents.is_empty());
        assert_eq!(project.start_day(), "2024-01-01");
    }

    #[rstest]
    fn task_decodes_null_assignee() {
        let dto: TaskDto = serde_json::from_value(json!({
            "id": 9,
            "title": "Write docs",
            "comment": "all of them",
            "priority": 2,
            "status": "InProgress",
            "authorId": 1,
            "authorFullName": "Dana Director",
            "assigneeId": null,
            "assigneeFullName": null,
            "projectId": 5,
        }))
        .expect("task decodes");
        let task = Task::from(dto);
        assert_eq!(task.assignee_id, None);
        assert_eq!(task.status, TaskStatus::InProgress);
    }

    #[rstest]
    fn empty_token_is_rejected() {
        let dto: AuthResponseDto = serde_json::from_value(json!({
            "accessToken": " ",
            "user": {"id": 1, "email": "a@b.c", "firstName": "A", "lastName": "B", "role": "Director"},
        }))
        .expect("shape decodes");
        assert!(dto.into_domain().is_err());
    }

    #[rstest]
    fn employee_update_omits_blank_password_and_uses_staff_role() {
        let update = EmployeeUpdate {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            middle_name: None,
            email: "ada@example.com".to_owned(),
            password: None,
            role: Role::Employee,
        };
        let body = serde_json::to_value(UpdateEmployeeDto::from(&update)).expect("encodes");
        assert_eq!(
            body,
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "role": "Developer",
            })
        );
    }

    #[rstest]
    fn new_employee_carries_password() {
        let employee = NewEmployee {
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            middle_name: Some("King".to_owned()),
            email: "ada@example.com".to_owned(),
            password: Zeroizing::new("Abc123!".to_owned()),
            role: Role::ProjectManager,
        };
        let body = serde_json::to_value(CreateEmployeeDto::from(&employee)).expect("encodes");
        assert_eq!(body["password"], "Abc123!");
        assert_eq!(body["middleName"], "King");
        assert_eq!(body["role"], "ProjectManager");
    }

    #[rstest]
    fn create_project_flattens_fields() {
        let fields = ProjectFields {
            name: "Apollo".to_owned(),
            customer_company: "NASA".to_owned(),
            executor_company: "Grumman".to_owned(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date"),
            priority: 3,
            manager_id: EmployeeId::new(2),
        };
        let employee_ids = [EmployeeId::new(4), EmployeeId::new(5)];
        let dto = CreateProjectDto {
            fields: ProjectFieldsDto::from(&fields),
            employee_ids: &employee_ids,
        };
        let body = serde_json::to_value(&dto).expect("encodes");
        assert_eq!(body["customerCompany"], "NASA");
        assert_eq!(body["startDate"], "2024-01-01T00:00:00.000Z");
        assert_eq!(body["employeeIds"], json!([4, 5]));
        assert_eq!(
            dto.fields.form_fields().last(),
            Some(&("managerId", "2".to_owned()))
        );
    }
}
