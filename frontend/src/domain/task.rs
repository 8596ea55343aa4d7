//! Tasks, their status and the client-side list filter.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{EmployeeId, ProjectId, TaskId};

/// Lowest accepted task or project priority.
pub const PRIORITY_MIN: u8 = 1;
/// Highest accepted task or project priority.
pub const PRIORITY_MAX: u8 = 10;

/// Progress state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started.
    ToDo,
    /// Being worked on.
    InProgress,
    /// Finished.
    Done,
}

impl TaskStatus {
    /// Wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "ToDo",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status or sort key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownTaskOptionError {
    kind: &'static str,
    value: String,
}

impl FromStr for TaskStatus {
    type Err = UnknownTaskOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "todo" => Ok(Self::ToDo),
            "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(UnknownTaskOptionError {
                kind: "task status",
                value: s.to_owned(),
            }),
        }
    }
}

/// Task as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Task id.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Description.
    pub comment: String,
    /// Priority, 1 is highest.
    pub priority: i32,
    /// Status.
    pub status: TaskStatus,
    /// Author's employee id.
    pub author_id: EmployeeId,
    /// Author's display name.
    pub author_full_name: Option<String>,
    /// Assignee's employee id.
    pub assignee_id: Option<EmployeeId>,
    /// Assignee's display name.
    pub assignee_full_name: Option<String>,
    /// Owning project.
    pub project_id: ProjectId,
}

/// Payload for `POST /Tasks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Title.
    pub title: String,
    /// Description.
    pub comment: String,
    /// Priority in `1..=10`.
    pub priority: u8,
    /// Owning project.
    pub project_id: ProjectId,
    /// The signed-in user.
    pub author_id: EmployeeId,
    /// Assignee.
    pub assignee_id: EmployeeId,
}

/// Payload for `PUT /Tasks/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    /// Title.
    pub title: String,
    /// Description.
    pub comment: String,
    /// Priority in `1..=10`.
    pub priority: u8,
    /// New status, when changed.
    pub status: Option<TaskStatus>,
    /// New assignee, when changed.
    pub assignee_id: Option<EmployeeId>,
}

/// Server-side filters for `GET /Tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Only tasks with this status.
    pub status: Option<TaskStatus>,
    /// Backend sort key.
    pub sort_by: Option<String>,
}

impl TaskQuery {
    /// Query string pairs; unset filters are omitted.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_owned()));
        }
        if let Some(sort_by) = self.sort_by.as_deref().filter(|value| !value.trim().is_empty()) {
            pairs.push(("sortBy", sort_by.to_owned()));
        }
        pairs
    }
}

/// Sort orders offered by the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskSort {
    /// Priority ascending.
    #[default]
    Priority,
    /// Priority descending.
    PriorityDesc,
    /// Title A to Z.
    Title,
    /// Title Z to A.
    TitleDesc,
    /// Status name ascending.
    Status,
    /// Status name descending.
    StatusDesc,
}

impl TaskSort {
    fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            Self::Priority => a.priority.cmp(&b.priority),
            Self::PriorityDesc => b.priority.cmp(&a.priority),
            Self::Title => compare_text(&a.title, &b.title),
            Self::TitleDesc => compare_text(&b.title, &a.title),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
            Self::StatusDesc => b.status.as_str().cmp(a.status.as_str()),
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

impl FromStr for TaskSort {
    type Err = UnknownTaskOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "priority" => Ok(Self::Priority),
            "priority_desc" => Ok(Self::PriorityDesc),
            "title" => Ok(Self::Title),
            "title_desc" => Ok(Self::TitleDesc),
            "status" => Ok(Self::Status),
            "status_desc" => Ok(Self::StatusDesc),
            _ => Err(UnknownTaskOptionError {
                kind: "sort key",
                value: s.to_owned(),
            }),
        }
    }
}

/// Client-side filter and sort applied to a fetched task list.
///
/// # Examples
/// ```
/// use frontend::domain::{TaskFilter, TaskSort};
///
/// let filter = TaskFilter { sort: TaskSort::TitleDesc, ..TaskFilter::default() };
/// assert!(filter.apply(Vec::new()).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Keep only this status.
    pub status: Option<TaskStatus>,
    /// Case-insensitive term matched against title, comment and assignee.
    pub search: Option<String>,
    /// Sort order.
    pub sort: TaskSort,
}

impl TaskFilter {
    /// Filter then stable-sort `tasks`.
    #[must_use]
    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        let term = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase);
        let mut kept: Vec<Task> = tasks
            .into_iter()
            .filter(|task| self.status.is_none_or(|status| task.status == status))
            .filter(|task| term.as_deref().is_none_or(|needle| task_matches(task, needle)))
            .collect();
        kept.sort_by(|a, b| self.sort.compare(a, b));
        kept
    }
}

fn task_matches(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle)
        || task.comment.to_lowercase().contains(needle)
        || task
            .assignee_full_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(needle))
}

/// Problems with a task form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskFormError {
    /// A required field is blank or unset.
    #[error("{0} is required.")]
    Missing(&'static str),
    /// Priority is not an integer in range.
    #[error("{0}")]
    InvalidPriority(String),
}

/// Task creation form as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    /// Title.
    pub title: String,
    /// Description.
    pub comment: String,
    /// Priority as typed.
    pub priority: String,
    /// Owning project.
    pub project_id: Option<ProjectId>,
    /// Assignee.
    pub assignee_id: Option<EmployeeId>,
}

impl TaskForm {
    /// Validate the form into a create payload authored by `author_id`.
    ///
    /// # Errors
    ///
    /// Fails on a blank title, a missing project or assignee, or a bad
    /// priority.
    pub fn into_new_task(self, author_id: EmployeeId) -> Result<NewTask, TaskFormError> {
        let title = required_text("Title", &self.title)?;
        let project_id = self.project_id.ok_or(TaskFormError::Missing("Project"))?;
        let assignee_id = self.assignee_id.ok_or(TaskFormError::Missing("Assignee"))?;
        Ok(NewTask {
            title,
            comment: self.comment.trim().to_owned(),
            priority: parse_priority(&self.priority).map_err(TaskFormError::InvalidPriority)?,
            project_id,
            author_id,
            assignee_id,
        })
    }
}

/// Task edit form, prefilled from the stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    /// Title.
    pub title: String,
    /// Description.
    pub comment: String,
    /// Priority as typed.
    pub priority: String,
    /// Status.
    pub status: TaskStatus,
    /// Assignee.
    pub assignee_id: Option<EmployeeId>,
}

impl TaskEdit {
    /// Form holding `task`'s current values.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            comment: task.comment.clone(),
            priority: task.priority.to_string(),
            status: task.status,
            assignee_id: task.assignee_id,
        }
    }

    /// Validate the form into an update payload.
    ///
    /// # Errors
    ///
    /// Fails on a blank title or a bad priority.
    pub fn into_update(self) -> Result<TaskUpdate, TaskFormError> {
        Ok(TaskUpdate {
            title: required_text("Title", &self.title)?,
            comment: self.comment.trim().to_owned(),
            priority: parse_priority(&self.priority).map_err(TaskFormError::InvalidPriority)?,
            status: Some(self.status),
            assignee_id: self.assignee_id,
        })
    }
}

fn required_text(label: &'static str, value: &str) -> Result<String, TaskFormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskFormError::Missing(label));
    }
    Ok(trimmed.to_owned())
}

/// Parse a priority typed into a form.
///
/// # Errors
///
/// Returns a message when the value is not an integer in `1..=10`.
pub fn parse_priority(raw: &str) -> Result<u8, String> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|value| (PRIORITY_MIN..=PRIORITY_MAX).contains(value))
        .ok_or_else(|| format!("priority must be a whole number from {PRIORITY_MIN} to {PRIORITY_MAX}, got '{raw}'"))
}
