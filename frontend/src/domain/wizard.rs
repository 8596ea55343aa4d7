//! Five-step project create/edit wizard.
//!
//! The wizard holds the raw form as typed, walks the steps linearly and only
//! produces a [`ProjectSubmission`] from the last step once every step is
//! complete. In edit mode it keeps the roster captured at load time so the
//! submission can carry a [`RosterChange`] instead of the full roster.

use chrono::NaiveDate;

use super::task::parse_priority;
use super::{
    Attachment, DocumentId, EmployeeId, NewProject, Project, ProjectDocument, ProjectFields,
    ProjectId, ProjectUpdate, Route,
};

mod roster;

pub use roster::RosterChange;

/// Maximum number of files attached in one submission.
pub const MAX_ATTACHMENTS: usize = 10;

/// Wizard steps in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    /// Name, dates and priority.
    BasicInfo,
    /// Customer and executor companies.
    Companies,
    /// Project manager.
    Manager,
    /// Assigned employees.
    Employees,
    /// Attachments.
    Documents,
}

impl WizardStep {
    /// All steps in order.
    pub const ALL: [Self; 5] = [
        Self::BasicInfo,
        Self::Companies,
        Self::Manager,
        Self::Employees,
        Self::Documents,
    ];

    /// One-based step number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::BasicInfo => 1,
            Self::Companies => 2,
            Self::Manager => 3,
            Self::Employees => 4,
            Self::Documents => 5,
        }
    }

    /// Step title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Information",
            Self::Companies => "Companies",
            Self::Manager => "Project Manager",
            Self::Employees => "Employees",
            Self::Documents => "Documents",
        }
    }

    /// Following step.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::BasicInfo => Some(Self::Companies),
            Self::Companies => Some(Self::Manager),
            Self::Manager => Some(Self::Employees),
            Self::Employees => Some(Self::Documents),
            Self::Documents => None,
        }
    }

    /// Preceding step.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::BasicInfo => None,
            Self::Companies => Some(Self::BasicInfo),
            Self::Manager => Some(Self::Companies),
            Self::Employees => Some(Self::Manager),
            Self::Documents => Some(Self::Employees),
        }
    }
}

/// Form values as typed into the wizard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    /// Project name.
    pub name: String,
    /// Customer company.
    pub customer_company: String,
    /// Executor company.
    pub executor_company: String,
    /// Start date, `YYYY-MM-DD`.
    pub start_date: String,
    /// End date, `YYYY-MM-DD`.
    pub end_date: String,
    /// Priority as typed.
    pub priority: String,
    /// Selected manager.
    pub manager_id: Option<EmployeeId>,
    /// Selected employees.
    pub employee_ids: Vec<EmployeeId>,
}

/// Whether the wizard creates a project or edits one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardMode {
    /// Create a new project.
    Create,
    /// Edit an existing project.
    Edit {
        /// Project being edited.
        project_id: ProjectId,
        /// Roster at load time.
        initial_employee_ids: Vec<EmployeeId>,
    },
}

/// Reasons the wizard refuses to move on or submit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    /// The step's required fields are missing.
    #[error("step {} ({}) is incomplete", .0.number(), .0.title())]
    IncompleteStep(WizardStep),
    /// `next` was called on the last step.
    #[error("already on the last step")]
    AtLastStep,
    /// Submission attempted before the last step.
    #[error("projects can only be submitted from the last step")]
    NotOnLastStep,
    /// Priority is not an integer in range.
    #[error("{0}")]
    InvalidPriority(String),
    /// A date does not parse as `YYYY-MM-DD`.
    #[error("{field} must be a date in YYYY-MM-DD format, got '{value}'")]
    InvalidDate {
        /// Field label.
        field: &'static str,
        /// Rejected value.
        value: String,
    },
    /// The document is not listed on the project.
    #[error("document {0} is not attached to this project")]
    UnknownDocument(DocumentId),
}

/// What the wizard asks the backend to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectSubmission {
    /// One create call with the full roster and files.
    Create(NewProject),
    /// One update call, then roster additions and removals when non-empty.
    Edit {
        /// Project being edited.
        project_id: ProjectId,
        /// Scalar fields and new files.
        update: ProjectUpdate,
        /// Roster diff against the load-time snapshot.
        roster: RosterChange,
    },
}

impl ProjectSubmission {
    /// Page to show after the submission succeeds.
    #[must_use]
    pub const fn redirect(&self) -> Route {
        match self {
            Self::Create(_) => Route::Projects,
            Self::Edit { project_id, .. } => Route::Project(*project_id),
        }
    }
}

/// Wizard state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectWizard {
    step: WizardStep,
    mode: WizardMode,
    form: ProjectForm,
    files: Vec<Attachment>,
    documents: Vec<ProjectDocument>,
}

impl ProjectWizard {
    /// Empty wizard in create mode on step 1.
    #[must_use]
    pub fn create() -> Self {
        Self {
            step: WizardStep::BasicInfo,
            mode: WizardMode::Create,
            form: ProjectForm::default(),
            files: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Wizard in edit mode populated from `project`, capturing its roster.
    #[must_use]
    pub fn edit(project: &Project) -> Self {
        let employee_ids = project.employee_ids();
        Self {
            step: WizardStep::BasicInfo,
            mode: WizardMode::Edit {
                project_id: project.id,
                initial_employee_ids: employee_ids.clone(),
            },
            form: ProjectForm {
                name: project.name.clone(),
                customer_company: project.customer_company.clone(),
                executor_company: project.executor_company.clone(),
                start_date: project.start_day(),
                end_date: project.end_day(),
                priority: project.priority.to_string(),
                manager_id: Some(project.manager_id),
                employee_ids,
            },
            files: Vec::new(),
            documents: project.documents.clone(),
        }
    }

    /// Current step.
    #[must_use]
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Create or edit mode.
    #[must_use]
    pub fn mode(&self) -> &WizardMode {
        &self.mode
    }

    /// Form values.
    #[must_use]
    pub fn form(&self) -> &ProjectForm {
        &self.form
    }

    /// Mutable form values.
    pub fn form_mut(&mut self) -> &mut ProjectForm {
        &mut self.form
    }

    /// Files selected for upload.
    #[must_use]
    pub fn files(&self) -> &[Attachment] {
        &self.files
    }

    /// Documents already attached to the project being edited.
    #[must_use]
    pub fn documents(&self) -> &[ProjectDocument] {
        &self.documents
    }

    /// Whether `step`'s required fields are filled.
    #[must_use]
    pub fn is_step_complete(&self, step: WizardStep) -> bool {
        let filled = |value: &str| !value.trim().is_empty();
        match step {
            WizardStep::BasicInfo => {
                filled(&self.form.name)
                    && filled(&self.form.start_date)
                    && filled(&self.form.end_date)
                    && filled(&self.form.priority)
            }
            WizardStep::Companies => {
                filled(&self.form.customer_company) && filled(&self.form.executor_company)
            }
            WizardStep::Manager => self.form.manager_id.is_some(),
            WizardStep::Employees | WizardStep::Documents => true,
        }
    }

    /// Whether the current step allows moving on.
    #[must_use]
    pub fn can_proceed(&self) -> bool {
        self.is_step_complete(self.step)
    }

    /// Advance one step.
    ///
    /// # Errors
    ///
    /// Fails when the current step is incomplete or already the last.
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        let following = self.step.next().ok_or(WizardError::AtLastStep)?;
        if !self.can_proceed() {
            return Err(WizardError::IncompleteStep(self.step));
        }
        self.step = following;
        Ok(following)
    }

    /// Go back one step. Returns `false` on step 1.
    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(previous) => {
                self.step = previous;
                true
            }
            None => false,
        }
    }

    /// Select or deselect an employee. Returns whether it is now selected.
    pub fn toggle_employee(&mut self, id: EmployeeId) -> bool {
        if let Some(position) = self.form.employee_ids.iter().position(|current| *current == id) {
            self.form.employee_ids.remove(position);
            false
        } else {
            self.form.employee_ids.push(id);
            true
        }
    }

    /// Add files up to [`MAX_ATTACHMENTS`]; extra files are dropped.
    /// Returns how many were accepted.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = Attachment>) -> usize {
        let room = MAX_ATTACHMENTS.saturating_sub(self.files.len());
        let before = self.files.len();
        self.files.extend(files.into_iter().take(room));
        self.files.len() - before
    }

    /// Remove the file at `index`.
    pub fn remove_file(&mut self, index: usize) -> Option<Attachment> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    /// Project id in edit mode.
    #[must_use]
    pub fn project_id(&self) -> Option<ProjectId> {
        match &self.mode {
            WizardMode::Edit { project_id, .. } => Some(*project_id),
            WizardMode::Create => None,
        }
    }

    /// Check that `document_id` is listed before deleting it remotely.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::UnknownDocument`] for unlisted documents.
    pub fn ensure_document(&self, document_id: DocumentId) -> Result<(), WizardError> {
        if self.documents.iter().any(|doc| doc.id == document_id) {
            Ok(())
        } else {
            Err(WizardError::UnknownDocument(document_id))
        }
    }

    /// Drop a document from the list after the backend deleted it.
    pub fn forget_document(&mut self, document_id: DocumentId) -> bool {
        let before = self.documents.len();
        self.documents.retain(|doc| doc.id != document_id);
        self.documents.len() != before
    }

    /// Validate every step and assemble the submission.
    ///
    /// # Errors
    ///
    /// Fails off the last step, on the first incomplete step, or when the
    /// priority or a date does not parse.
    pub fn build_submission(&self) -> Result<ProjectSubmission, WizardError> {
        if self.step.next().is_some() {
            return Err(WizardError::NotOnLastStep);
        }
        if let Some(step) = WizardStep::ALL
            .into_iter()
            .find(|step| !self.is_step_complete(*step))
        {
            return Err(WizardError::IncompleteStep(step));
        }
        let fields = self.fields()?;
        let files = self.files.clone();
        Ok(match &self.mode {
            WizardMode::Create => ProjectSubmission::Create(NewProject {
                fields,
                employee_ids: self.form.employee_ids.clone(),
                files,
            }),
            WizardMode::Edit {
                project_id,
                initial_employee_ids,
            } => ProjectSubmission::Edit {
                project_id: *project_id,
                update: ProjectUpdate { fields, files },
                roster: RosterChange::between(initial_employee_ids, &self.form.employee_ids),
            },
        })
    }

    fn fields(&self) -> Result<ProjectFields, WizardError> {
        let manager_id = self
            .form
            .manager_id
            .ok_or(WizardError::IncompleteStep(WizardStep::Manager))?;
        Ok(ProjectFields {
            name: self.form.name.trim().to_owned(),
            customer_company: self.form.customer_company.trim().to_owned(),
            executor_company: self.form.executor_company.trim().to_owned(),
            start_date: parse_day("start date", &self.form.start_date)?,
            end_date: parse_day("end date", &self.form.end_date)?,
            priority: parse_priority(&self.form.priority).map_err(WizardError::InvalidPriority)?,
            manager_id,
        })
    }
}

fn parse_day(field: &'static str, raw: &str) -> Result<NaiveDate, WizardError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| WizardError::InvalidDate {
        field,
        value: raw.to_owned(),
    })
}

#[cfg(test)]
mod tests;
