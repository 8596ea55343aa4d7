//! Wizard navigation, attachment limits and submission assembly.

use super::*;
use crate::domain::EmployeeShort;
use crate::domain::Role;
use rstest::{fixture, rstest};

fn ids(raw: &[i64]) -> Vec<EmployeeId> {
    raw.iter().copied().map(EmployeeId::new).collect()
}

fn attachment(name: &str) -> Attachment {
    Attachment {
        file_name: name.to_owned(),
        bytes: name.as_bytes().to_vec(),
    }
}

#[fixture]
fn project() -> Project {
    Project {
        id: ProjectId::new(42),
        name: "Apollo".to_owned(),
        customer_company: "NASA".to_owned(),
        executor_company: "Grumman".to_owned(),
        start_date: "2024-03-01T00:00:00".to_owned(),
        end_date: "2024-09-30T00:00:00".to_owned(),
        priority: 3,
        manager_id: EmployeeId::new(2),
        manager_full_name: "Pat Manager".to_owned(),
        employees: [1, 2, 3]
            .into_iter()
            .map(|id| EmployeeShort {
                id: EmployeeId::new(id),
                full_name: format!("Employee {id}"),
                role: Role::Employee,
            })
            .collect(),
        tasks_count: 0,
        documents: vec![ProjectDocument {
            id: DocumentId::new(5),
            file_name: Some("plan.pdf".to_owned()),
            url: None,
        }],
    }
}

#[fixture]
fn filled() -> ProjectWizard {
    let mut wizard = ProjectWizard::create();
    let form = wizard.form_mut();
    form.name = "Gemini".to_owned();
    form.start_date = "2024-01-01".to_owned();
    form.end_date = "2024-06-30".to_owned();
    form.priority = "2".to_owned();
    form.customer_company = "NASA".to_owned();
    form.executor_company = "McDonnell".to_owned();
    form.manager_id = Some(EmployeeId::new(2));
    wizard
}

fn to_last_step(wizard: &mut ProjectWizard) {
    while wizard.step() != WizardStep::Documents {
        wizard.next().expect("step is complete");
    }
}

#[rstest]
fn steps_are_numbered_in_order() {
    let numbers: Vec<u8> = WizardStep::ALL.into_iter().map(WizardStep::number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    assert_eq!(WizardStep::BasicInfo.previous(), None);
    assert_eq!(WizardStep::Documents.next(), None);
}

#[rstest]
fn basic_info_requires_every_field() {
    let mut wizard = ProjectWizard::create();
    assert!(!wizard.can_proceed());

    let form = wizard.form_mut();
    form.name = "Gemini".to_owned();
    form.start_date = "2024-01-01".to_owned();
    form.end_date = "2024-06-30".to_owned();
    assert!(!wizard.can_proceed());

    wizard.form_mut().priority = "  ".to_owned();
    assert!(!wizard.can_proceed());

    wizard.form_mut().priority = "1".to_owned();
    assert!(wizard.can_proceed());
}

#[rstest]
fn next_refuses_incomplete_step() {
    let mut wizard = ProjectWizard::create();
    assert_eq!(
        wizard.next(),
        Err(WizardError::IncompleteStep(WizardStep::BasicInfo))
    );
    assert_eq!(wizard.step(), WizardStep::BasicInfo);
}

#[rstest]
fn companies_and_manager_gate_their_steps(mut filled: ProjectWizard) {
    filled.form_mut().executor_company.clear();
    filled.next().expect("basic info complete");
    assert_eq!(
        filled.next(),
        Err(WizardError::IncompleteStep(WizardStep::Companies))
    );

    filled.form_mut().executor_company = "McDonnell".to_owned();
    filled.form_mut().manager_id = None;
    filled.next().expect("companies complete");
    assert!(!filled.can_proceed());
}

#[rstest]
fn back_stops_at_first_step(mut filled: ProjectWizard) {
    filled.next().expect("basic info complete");
    assert!(filled.back());
    assert!(!filled.back());
    assert_eq!(filled.step(), WizardStep::BasicInfo);
}

#[rstest]
fn next_on_last_step_is_rejected(mut filled: ProjectWizard) {
    to_last_step(&mut filled);
    assert_eq!(filled.next(), Err(WizardError::AtLastStep));
}

#[rstest]
fn attachments_are_capped() {
    let mut wizard = ProjectWizard::create();
    let accepted = wizard.add_files((0..7).map(|n| attachment(&format!("a{n}.txt"))));
    assert_eq!(accepted, 7);
    let accepted = wizard.add_files((0..7).map(|n| attachment(&format!("b{n}.txt"))));
    assert_eq!(accepted, 3);
    assert_eq!(wizard.files().len(), MAX_ATTACHMENTS);
    assert_eq!(
        wizard.files().last().map(|file| file.file_name.as_str()),
        Some("b2.txt")
    );
}

#[rstest]
fn remove_file_ignores_out_of_range() {
    let mut wizard = ProjectWizard::create();
    wizard.add_files([attachment("a.txt"), attachment("b.txt")]);
    assert_eq!(wizard.remove_file(5), None);
    assert_eq!(
        wizard.remove_file(0).map(|file| file.file_name),
        Some("a.txt".to_owned())
    );
    assert_eq!(wizard.files().len(), 1);
}

#[rstest]
fn submit_only_from_last_step(filled: ProjectWizard) {
    assert_eq!(filled.build_submission(), Err(WizardError::NotOnLastStep));
}

#[rstest]
fn create_submission_carries_roster_and_files(mut filled: ProjectWizard) {
    filled.toggle_employee(EmployeeId::new(7));
    filled.toggle_employee(EmployeeId::new(8));
    filled.add_files([attachment("spec.txt")]);
    to_last_step(&mut filled);

    let submission = filled.build_submission().expect("valid wizard");
    assert_eq!(submission.redirect(), Route::Projects);
    let ProjectSubmission::Create(new_project) = submission else {
        panic!("expected create submission");
    };
    assert_eq!(new_project.employee_ids, ids(&[7, 8]));
    assert_eq!(new_project.files.len(), 1);
    assert_eq!(new_project.fields.priority, 2);
    assert_eq!(
        new_project.fields.start_date,
        NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
    );
}

#[rstest]
#[case("0")]
#[case("11")]
#[case("high")]
fn out_of_range_priority_is_rejected(mut filled: ProjectWizard, #[case] priority: &str) {
    filled.form_mut().priority = priority.to_owned();
    to_last_step(&mut filled);
    assert!(matches!(
        filled.build_submission(),
        Err(WizardError::InvalidPriority(_))
    ));
}

#[rstest]
fn malformed_date_is_rejected(mut filled: ProjectWizard) {
    filled.form_mut().end_date = "30/06/2024".to_owned();
    to_last_step(&mut filled);
    assert_eq!(
        filled.build_submission(),
        Err(WizardError::InvalidDate {
            field: "end date",
            value: "30/06/2024".to_owned(),
        })
    );
}

#[rstest]
fn edit_prefills_from_project(project: Project) {
    let wizard = ProjectWizard::edit(&project);
    assert_eq!(wizard.form().start_date, "2024-03-01");
    assert_eq!(wizard.form().end_date, "2024-09-30");
    assert_eq!(wizard.form().priority, "3");
    assert_eq!(wizard.form().employee_ids, ids(&[1, 2, 3]));
    assert_eq!(wizard.project_id(), Some(ProjectId::new(42)));
    assert_eq!(wizard.documents().len(), 1);
}

#[rstest]
fn edit_submission_diffs_roster(project: Project) {
    let mut wizard = ProjectWizard::edit(&project);
    assert!(!wizard.toggle_employee(EmployeeId::new(2)));
    assert!(wizard.toggle_employee(EmployeeId::new(9)));
    to_last_step(&mut wizard);

    let submission = wizard.build_submission().expect("valid wizard");
    assert_eq!(submission.redirect(), Route::Project(ProjectId::new(42)));
    let ProjectSubmission::Edit {
        project_id, roster, ..
    } = submission
    else {
        panic!("expected edit submission");
    };
    assert_eq!(project_id, ProjectId::new(42));
    assert_eq!(roster.added, ids(&[9]));
    assert_eq!(roster.removed, ids(&[2]));
}

#[rstest]
fn untouched_roster_produces_empty_change(project: Project) {
    let mut wizard = ProjectWizard::edit(&project);
    to_last_step(&mut wizard);
    let Ok(ProjectSubmission::Edit { roster, .. }) = wizard.build_submission() else {
        panic!("expected edit submission");
    };
    assert!(roster.is_empty());
}

#[rstest]
fn documents_are_checked_and_forgotten(project: Project) {
    let mut wizard = ProjectWizard::edit(&project);
    assert_eq!(
        wizard.ensure_document(DocumentId::new(6)),
        Err(WizardError::UnknownDocument(DocumentId::new(6)))
    );
    assert!(wizard.ensure_document(DocumentId::new(5)).is_ok());
    assert!(wizard.forget_document(DocumentId::new(5)));
    assert!(!wizard.forget_document(DocumentId::new(5)));
    assert!(wizard.documents().is_empty());
}

#[rstest]
#[case(&[1, 2, 3], &[1, 2, 3], &[], &[])]
#[case(&[1, 2, 3], &[1, 3], &[], &[2])]
#[case(&[], &[4, 4, 5], &[4, 5], &[])]
#[case(&[1, 2], &[2, 1], &[], &[])]
fn roster_change_is_a_set_difference(
    #[case] initial: &[i64],
    #[case] current: &[i64],
    #[case] added: &[i64],
    #[case] removed: &[i64],
) {
    let change = RosterChange::between(&ids(initial), &ids(current));
    assert_eq!(change.added, ids(added));
    assert_eq!(change.removed, ids(removed));
}
