//! Employee add/edit dialog state.
//!
//! The dialog owns its form, a general error or success message and a live
//! password error. Closing always resets all of them.

use zeroize::Zeroizing;

use super::{Employee, EmployeeId, EmployeeUpdate, NewEmployee, Role, validate_password};

/// Which record the dialog is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    /// Creating a new employee.
    Add,
    /// Editing an existing employee.
    Edit(EmployeeId),
}

/// Raw dialog fields as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeForm {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Middle name; blank means none.
    pub middle_name: String,
    /// Email.
    pub email: String,
    /// Password; optional when editing.
    pub password: Zeroizing<String>,
    /// Role.
    pub role: Role,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            middle_name: String::new(),
            email: String::new(),
            password: Zeroizing::new(String::new()),
            role: Role::Employee,
        }
    }
}

impl EmployeeForm {
    fn from_employee(employee: &Employee) -> Self {
        Self {
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            middle_name: employee.middle_name.clone().unwrap_or_default(),
            email: employee.email.clone(),
            password: Zeroizing::new(String::new()),
            role: employee.role,
        }
    }
}

/// Validated dialog submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeSubmission {
    /// Create a new employee.
    Create(NewEmployee),
    /// Update an existing employee.
    Update(EmployeeId, EmployeeUpdate),
}

/// Employee dialog state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDialog {
    open: bool,
    mode: Option<DialogMode>,
    form: EmployeeForm,
    error: Option<String>,
    success: Option<String>,
    password_error: Option<String>,
}

impl EmployeeDialog {
    /// Open an empty add dialog with the default role.
    pub fn open_add(&mut self) {
        self.close();
        self.open = true;
        self.mode = Some(DialogMode::Add);
    }

    /// Open an edit dialog prefilled from `employee`.
    pub fn open_edit(&mut self, employee: &Employee) {
        self.close();
        self.open = true;
        self.mode = Some(DialogMode::Edit(employee.id));
        self.form = EmployeeForm::from_employee(employee);
    }

    /// Close and reset the form and every message.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// Whether the dialog is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current mode, when open.
    #[must_use]
    pub fn mode(&self) -> Option<DialogMode> {
        self.mode
    }

    /// Form fields.
    #[must_use]
    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    /// Mutable form fields. Use [`EmployeeDialog::set_password`] for the
    /// password so it is re-validated.
    pub fn form_mut(&mut self) -> &mut EmployeeForm {
        &mut self.form
    }

    /// Update the password and re-validate it immediately.
    pub fn set_password(&mut self, value: &str) {
        self.form.password = Zeroizing::new(value.to_owned());
        let optional = matches!(self.mode, Some(DialogMode::Edit(_))) && value.is_empty();
        self.password_error = if optional {
            None
        } else {
            validate_password(value).err().map(|err| err.to_string())
        };
    }

    /// General error message.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Success message.
    #[must_use]
    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Live password error.
    #[must_use]
    pub fn password_error(&self) -> Option<&str> {
        self.password_error.as_deref()
    }

    /// Record a failed submission.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.success = None;
        self.error = Some(message.into());
    }

    /// Record a successful submission and clear the form.
    pub fn succeed(&mut self, message: impl Into<String>) {
        let mode = self.mode;
        self.form = match mode {
            Some(DialogMode::Edit(_)) => EmployeeForm {
                password: Zeroizing::new(String::new()),
                ..self.form.clone()
            },
            _ => EmployeeForm::default(),
        };
        self.error = None;
        self.password_error = None;
        self.success = Some(message.into());
    }

    /// Validate the form. The password is checked before anything else and
    /// a failure is recorded on the dialog; no submission is produced.
    pub fn submit(&mut self) -> Option<EmployeeSubmission> {
        let mode = self.mode?;
        self.error = None;
        self.success = None;

        let password = self.form.password.as_str();
        let password_required = matches!(mode, DialogMode::Add) || !password.is_empty();
        if password_required {
            if let Err(err) = validate_password(password) {
                let message = err.to_string();
                self.password_error = Some(message.clone());
                self.error = Some(message);
                return None;
            }
        }

        let missing = [
            ("First name", &self.form.first_name),
            ("Last name", &self.form.last_name),
            ("Email", &self.form.email),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label);
        if let Some(label) = missing {
            self.error = Some(format!("{label} is required."));
            return None;
        }

        let middle_name = Some(self.form.middle_name.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        let submission = match mode {
            DialogMode::Add => EmployeeSubmission::Create(NewEmployee {
                first_name: self.form.first_name.trim().to_owned(),
                last_name: self.form.last_name.trim().to_owned(),
                middle_name,
                email: self.form.email.trim().to_owned(),
                password: self.form.password.clone(),
                role: self.form.role,
            }),
            DialogMode::Edit(id) => EmployeeSubmission::Update(
                id,
                EmployeeUpdate {
                    first_name: self.form.first_name.trim().to_owned(),
                    last_name: self.form.last_name.trim().to_owned(),
                    middle_name,
                    email: self.form.email.trim().to_owned(),
                    password: Some(self.form.password.clone()).filter(|value| !value.is_empty()),
                    role: self.form.role,
                },
            ),
        };
        Some(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PASSWORD_POLICY_MESSAGE;
    use rstest::{fixture, rstest};

    #[fixture]
    fn filled_add() -> EmployeeDialog {
        let mut dialog = EmployeeDialog::default();
        dialog.open_add();
        let form = dialog.form_mut();
        form.first_name = "Ada".to_owned();
        form.last_name = "Lovelace".to_owned();
        form.email = "ada@example.com".to_owned();
        dialog
    }

    fn employee() -> Employee {
        Employee {
            id: EmployeeId::new(8),
            first_name: "Grace".to_owned(),
            last_name: "Hopper".to_owned(),
            middle_name: Some("Brewster".to_owned()),
            email: "grace@example.com".to_owned(),
            role: Role::ProjectManager,
        }
    }

    #[rstest]
    fn add_defaults_to_developer_role() {
        let mut dialog = EmployeeDialog::default();
        dialog.open_add();
        assert!(dialog.is_open());
        assert_eq!(dialog.form().role, Role::Employee);
    }

    #[rstest]
    fn weak_password_blocks_submission(mut filled_add: EmployeeDialog) {
        filled_add.set_password("abc123");
        assert_eq!(filled_add.password_error(), Some(PASSWORD_POLICY_MESSAGE));

        assert!(filled_add.submit().is_none());
        assert_eq!(filled_add.error(), Some(PASSWORD_POLICY_MESSAGE));
    }

    #[rstest]
    fn live_validation_clears_once_fixed(mut filled_add: EmployeeDialog) {
        filled_add.set_password("abc");
        assert!(filled_add.password_error().is_some());
        filled_add.set_password("Abc123!");
        assert!(filled_add.password_error().is_none());
    }

    #[rstest]
    fn valid_add_produces_create(mut filled_add: EmployeeDialog) {
        filled_add.set_password("Abc123!");
        let submission = filled_add.submit().expect("valid form");
        let EmployeeSubmission::Create(new_employee) = submission else {
            panic!("expected create submission");
        };
        assert_eq!(new_employee.first_name, "Ada");
        assert_eq!(new_employee.middle_name, None);
        assert_eq!(new_employee.password.as_str(), "Abc123!");
    }

    #[rstest]
    fn missing_name_is_reported(mut filled_add: EmployeeDialog) {
        filled_add.set_password("Abc123!");
        filled_add.form_mut().last_name = " ".to_owned();
        assert!(filled_add.submit().is_none());
        assert_eq!(filled_add.error(), Some("Last name is required."));
    }

    #[rstest]
    fn edit_without_password_omits_it() {
        let mut dialog = EmployeeDialog::default();
        dialog.open_edit(&employee());
        dialog.set_password("");
        assert!(dialog.password_error().is_none());

        let Some(EmployeeSubmission::Update(id, update)) = dialog.submit() else {
            panic!("expected update submission");
        };
        assert_eq!(id, EmployeeId::new(8));
        assert_eq!(update.password, None);
        assert_eq!(update.middle_name.as_deref(), Some("Brewster"));
    }

    #[rstest]
    fn edit_with_weak_password_is_rejected() {
        let mut dialog = EmployeeDialog::default();
        dialog.open_edit(&employee());
        dialog.set_password("weak");
        assert!(dialog.submit().is_none());
    }

    #[rstest]
    fn close_resets_everything(mut filled_add: EmployeeDialog) {
        filled_add.fail("Failed to create employee.");
        filled_add.set_password("x");
        filled_add.close();
        assert_eq!(filled_add, EmployeeDialog::default());
    }

    #[rstest]
    fn success_clears_add_form(mut filled_add: EmployeeDialog) {
        filled_add.succeed("Employee created successfully.");
        assert_eq!(filled_add.success(), Some("Employee created successfully."));
        assert!(filled_add.form().first_name.is_empty());
    }
}
