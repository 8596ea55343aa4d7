//! Driven ports: the REST API and the persisted session.

mod macros;
pub(crate) use macros::define_port_error;

mod api_error;
mod auth_api;
mod employees_api;
mod projects_api;
mod session_repository;
mod tasks_api;

pub use api_error::ApiError;
#[cfg(test)]
pub use auth_api::MockAuthApi;
pub use auth_api::AuthApi;
#[cfg(test)]
pub use employees_api::MockEmployeesApi;
pub use employees_api::EmployeesApi;
#[cfg(test)]
pub use projects_api::MockProjectsApi;
pub use projects_api::ProjectsApi;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
pub use session_repository::{
    InMemorySessionRepository, SessionRepository, SessionRepositoryError,
};
#[cfg(test)]
pub use tasks_api::MockTasksApi;
pub use tasks_api::TasksApi;
