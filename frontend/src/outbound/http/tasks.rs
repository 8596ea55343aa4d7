//! `/Tasks` endpoints.

use async_trait::async_trait;
use reqwest::Method;

use super::HttpApiClient;
use super::dto::{CreateTaskDto, TaskDto, UpdateTaskDto};
use crate::domain::ports::{ApiError, TasksApi};
use crate::domain::{EmployeeId, NewTask, ProjectId, Task, TaskId, TaskQuery, TaskUpdate};

const TASKS: &str = "/Tasks";

fn task_path(id: TaskId) -> String {
    format!("{TASKS}/{id}")
}

impl HttpApiClient {
    async fn task_list(&self, path: &str, query: &[(&str, String)]) -> Result<Vec<Task>, ApiError> {
        let dtos: Vec<TaskDto> = self
            .execute_json(self.request(Method::GET, path).query(query))
            .await?;
        Ok(dtos.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TasksApi for HttpApiClient {
    async fn list(&self, query: &TaskQuery) -> Result<Vec<Task>, ApiError> {
        self.task_list(TASKS, &query.to_pairs()).await
    }

    async fn get(&self, id: TaskId) -> Result<Task, ApiError> {
        let dto: TaskDto = self
            .execute_json(self.request(Method::GET, &task_path(id)))
            .await?;
        Ok(dto.into())
    }

    async fn list_for_project(&self, project_id: ProjectId) -> Result<Vec<Task>, ApiError> {
        self.task_list(&format!("{TASKS}/project/{project_id}"), &[])
            .await
    }

    async fn list_for_assignee(&self, assignee_id: EmployeeId) -> Result<Vec<Task>, ApiError> {
        self.task_list(&format!("{TASKS}/assignee/{assignee_id}"), &[])
            .await
    }

    async fn create(&self, task: &NewTask) -> Result<Task, ApiError> {
        let body = CreateTaskDto::from(task);
        let dto: TaskDto = self
            .execute_json(self.json_request(Method::POST, TASKS, &body))
            .await?;
        Ok(dto.into())
    }

    async fn update(&self, id: TaskId, task: &TaskUpdate) -> Result<(), ApiError> {
        let body = UpdateTaskDto::from(task);
        self.execute_unit(self.json_request(Method::PUT, &task_path(id), &body))
            .await
    }

    async fn delete(&self, id: TaskId) -> Result<(), ApiError> {
        self.execute_unit(self.request(Method::DELETE, &task_path(id)))
            .await
    }
}
