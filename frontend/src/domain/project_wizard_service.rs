//! Drives the project wizard against the projects port.
//!
//! An edit is sent as one update followed by roster additions and removals,
//! each only when non-empty, so the backend never sees the full roster.

use std::sync::Arc;

use tracing::info;

use super::ports::ProjectsApi;
use super::service_support::{api_failure, require, signed_in};
use super::{
    AppContext, Capability, DocumentId, Error, ProjectId, ProjectSubmission, ProjectWizard, Route,
    WizardError,
};

const EDIT_DENIED: &str = "You do not have permission to edit this project.";

fn map_wizard_error(error: WizardError) -> Error {
    Error::invalid_request(error.to_string())
}

/// Project create/edit workflow.
#[derive(Clone)]
pub struct ProjectWizardService<P> {
    projects: Arc<P>,
}

impl<P> ProjectWizardService<P> {
    /// Create the service from the projects port.
    pub fn new(projects: Arc<P>) -> Self {
        Self { projects }
    }
}

impl<P> ProjectWizardService<P>
where
    P: ProjectsApi,
{
    /// Empty wizard for a new project.
    ///
    /// # Errors
    ///
    /// Forbidden unless the user may create projects.
    pub fn start_create(&self, ctx: &AppContext) -> Result<ProjectWizard, Error> {
        require(ctx, Capability::CreateProject, "Only Directors can create projects.")?;
        Ok(ProjectWizard::create())
    }

    /// Wizard populated from an existing project.
    ///
    /// # Errors
    ///
    /// The mapped API failure, or forbidden when the user cannot manage the
    /// project; no wizard is built in either case.
    pub async fn load_for_edit(
        &self,
        ctx: &AppContext,
        id: ProjectId,
    ) -> Result<ProjectWizard, Error> {
        signed_in(ctx)?;
        let project = self
            .projects
            .get(id)
            .await
            .map_err(api_failure("load project", "Failed to load project."))?;
        if !ctx.can(Capability::ManageProject(&project)) {
            return Err(Error::forbidden(EDIT_DENIED));
        }
        Ok(ProjectWizard::edit(&project))
    }

    /// Submit the wizard from its last step and return the page to show next.
    ///
    /// # Errors
    ///
    /// Invalid when the wizard does not validate; otherwise the first failed
    /// API call. Later calls are not attempted after a failure.
    pub async fn submit(&self, ctx: &AppContext, wizard: &ProjectWizard) -> Result<Route, Error> {
        signed_in(ctx)?;
        let submission = wizard.build_submission().map_err(map_wizard_error)?;
        let next = submission.redirect();
        match submission {
            ProjectSubmission::Create(project) => {
                require(ctx, Capability::CreateProject, "Only Directors can create projects.")?;
                let created = self
                    .projects
                    .create(&project)
                    .await
                    .map_err(api_failure("create project", "Failed to create project"))?;
                info!(project_id = %created.id, "project created");
            }
            ProjectSubmission::Edit {
                project_id,
                update,
                roster,
            } => {
                self.projects
                    .update(project_id, &update)
                    .await
                    .map_err(api_failure("update project", "Failed to update project"))?;
                if !roster.added.is_empty() {
                    self.projects
                        .add_employees(project_id, &roster.added)
                        .await
                        .map_err(api_failure("add project employees", "Failed to update project"))?;
                }
                if !roster.removed.is_empty() {
                    self.projects
                        .remove_employees(project_id, &roster.removed)
                        .await
                        .map_err(api_failure(
                            "remove project employees",
                            "Failed to update project",
                        ))?;
                }
                info!(
                    project_id = %project_id,
                    added = roster.added.len(),
                    removed = roster.removed.len(),
                    "project updated"
                );
            }
        }
        Ok(next)
    }

    /// Delete an attached document and drop it from the wizard.
    ///
    /// # Errors
    ///
    /// Invalid outside edit mode or for an unlisted document; otherwise the
    /// mapped API failure, leaving the wizard unchanged.
    pub async fn delete_document(
        &self,
        ctx: &AppContext,
        wizard: &mut ProjectWizard,
        document_id: DocumentId,
    ) -> Result<(), Error> {
        signed_in(ctx)?;
        let project_id = wizard.project_id().ok_or_else(|| {
            Error::invalid_request("Documents can only be deleted while editing a project.")
        })?;
        wizard
            .ensure_document(document_id)
            .map_err(map_wizard_error)?;
        self.projects
            .delete_document(project_id, document_id)
            .await
            .map_err(api_failure("delete document", "Failed to delete document."))?;
        wizard.forget_document(document_id);
        info!(project_id = %project_id, document_id = %document_id, "document deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "project_wizard_service_tests.rs"]
mod tests;
