//! Projects, their documents and list queries.

use chrono::{DateTime, NaiveDate, Utc};

use super::{DocumentId, EmployeeId, EmployeeShort, ProjectId};

/// Project as returned by the backend.
///
/// Dates are kept as the backend formats them; [`Project::start_day`] and
/// [`Project::end_day`] expose the UTC calendar day used by forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Project id.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Customer company.
    pub customer_company: String,
    /// Executor company.
    pub executor_company: String,
    /// Start timestamp as sent by the backend.
    pub start_date: String,
    /// End timestamp as sent by the backend.
    pub end_date: String,
    /// Priority, 1 is highest.
    pub priority: i32,
    /// Manager's employee id.
    pub manager_id: EmployeeId,
    /// Manager's display name.
    pub manager_full_name: String,
    /// Assigned employees.
    pub employees: Vec<EmployeeShort>,
    /// Number of tasks in the project.
    pub tasks_count: u32,
    /// Attached documents.
    pub documents: Vec<ProjectDocument>,
}

impl Project {
    /// Start date as a `YYYY-MM-DD` UTC day.
    #[must_use]
    pub fn start_day(&self) -> String {
        utc_day(&self.start_date)
    }

    /// End date as a `YYYY-MM-DD` UTC day.
    #[must_use]
    pub fn end_day(&self) -> String {
        utc_day(&self.end_date)
    }

    /// Ids of the assigned employees in roster order.
    #[must_use]
    pub fn employee_ids(&self) -> Vec<EmployeeId> {
        self.employees.iter().map(|employee| employee.id).collect()
    }
}

/// Offset timestamps are converted to UTC first; naive ones keep their
/// leading `YYYY-MM-DD`.
fn utc_day(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp).map_or_else(
        |_| timestamp.get(..10).unwrap_or(timestamp).to_owned(),
        |moment| moment.with_timezone(&Utc).format("%Y-%m-%d").to_string(),
    )
}

/// Document attached to a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDocument {
    /// Document id.
    pub id: DocumentId,
    /// Original file name, when the backend reports one.
    pub file_name: Option<String>,
    /// Download location, when the backend reports one.
    pub url: Option<String>,
}

impl ProjectDocument {
    /// Name to show for the document.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.file_name
            .clone()
            .unwrap_or_else(|| format!("document #{}", self.id))
    }
}

/// A file selected for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name sent with the upload.
    pub file_name: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Validated scalar fields shared by project create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields {
    /// Project name.
    pub name: String,
    /// Customer company.
    pub customer_company: String,
    /// Executor company.
    pub executor_company: String,
    /// Start date; sent as UTC midnight.
    pub start_date: NaiveDate,
    /// End date; sent as UTC midnight.
    pub end_date: NaiveDate,
    /// Priority in `1..=10`.
    pub priority: u8,
    /// Manager's employee id.
    pub manager_id: EmployeeId,
}

/// Payload for `POST /Projects`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    /// Scalar fields.
    pub fields: ProjectFields,
    /// Initial roster.
    pub employee_ids: Vec<EmployeeId>,
    /// Files to upload.
    pub files: Vec<Attachment>,
}

/// Payload for `PUT /Projects/:id`. The roster is changed separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectUpdate {
    /// Scalar fields.
    pub fields: ProjectFields,
    /// Additional files to upload.
    pub files: Vec<Attachment>,
}

/// Server-side filters for the project list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectQuery {
    /// Earliest start date.
    pub start_from: Option<NaiveDate>,
    /// Latest start date.
    pub start_to: Option<NaiveDate>,
    /// Exact priority.
    pub priority: Option<u8>,
    /// Backend sort key.
    pub sort_by: Option<String>,
}

impl ProjectQuery {
    /// Query string pairs in a stable order; unset filters are omitted.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::ProjectQuery;
    ///
    /// let query = ProjectQuery { priority: Some(2), ..ProjectQuery::default() };
    /// assert_eq!(query.to_pairs(), vec![("priority", "2".to_owned())]);
    /// ```
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(from) = self.start_from {
            pairs.push(("startFrom", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.start_to {
            pairs.push(("startTo", to.format("%Y-%m-%d").to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.to_string()));
        }
        if let Some(sort_by) = self.sort_by.as_deref().filter(|value| !value.trim().is_empty()) {
            pairs.push(("sortBy", sort_by.to_owned()));
        }
        pairs
    }
}
