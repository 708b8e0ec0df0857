//! End-to-end wizard scenarios against a recording store.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use loan_core::allocator::{IdAllocator, SeededCandidates};
use loan_core::currency::EMPTY_PLACEHOLDER;
use loan_core::db::{ApplicationRepository, RepositoryError};
use loan_core::form::{FailureReason, FieldId};
use loan_core::local::{LAST_LOAN_ID_KEY, LocalStore, MemoryLocalStore};
use loan_core::models::{
    ApplicantCategory, ApplicationRecord, LOAN_ID_ALPHABET, LOAN_ID_LEN, LOAN_ID_PREFIX, LoanId,
    NewApplication,
};
use loan_core::submission::{SubmissionConfig, SubmissionError, SubmissionOrchestrator};
use loan_core::wizard::{Step, Wizard};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Remembers every call and never finds an existing id.
#[derive(Default)]
struct RecordingRepository {
    exists_calls: Mutex<Vec<LoanId>>,
    puts: Mutex<Vec<ApplicationRecord>>,
}

impl RecordingRepository {
    fn puts(&self) -> Vec<ApplicationRecord> {
        self.puts.lock().unwrap().clone()
    }

    fn call_count(&self) -> usize {
        self.exists_calls.lock().unwrap().len() + self.puts.lock().unwrap().len()
    }
}

#[async_trait]
impl ApplicationRepository for RecordingRepository {
    async fn exists(
        &self,
        id: &LoanId,
    ) -> Result<bool, RepositoryError> {
        self.exists_calls.lock().unwrap().push(id.clone());
        Ok(false)
    }

    async fn put(
        &self,
        id: &LoanId,
        application: NewApplication,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let record = ApplicationRecord::new(id.clone(), application, Utc::now());
        self.puts.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn get(
        &self,
        id: &LoanId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(self
            .puts
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.loan_id == id)
            .cloned())
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("loan_core=debug")
        .try_init();
}

fn orchestrator(
    repo: Arc<RecordingRepository>,
    local: Arc<MemoryLocalStore>,
) -> SubmissionOrchestrator<SeededCandidates> {
    SubmissionOrchestrator::with_allocator(
        repo,
        local,
        IdAllocator::with_source(SeededCandidates::new(42)),
    )
    .config(SubmissionConfig {
        min_overlay: Duration::from_millis(10),
    })
}

fn fill_step_one(wizard: &mut Wizard) {
    for (field, value) in [
        (FieldId::FullName, "María Fernanda Solís"),
        (FieldId::NationalId, "2-0456-0789"),
        (FieldId::DateOfBirth, "1985-11-23"),
        (FieldId::Phone, "+506 7012-3456"),
        (FieldId::Email, "mfsolis@example.cr"),
        (FieldId::MaritalStatus, "soltero"),
        (FieldId::Province, "Alajuela"),
        (FieldId::Canton, "Grecia"),
        (FieldId::District, "Tacares"),
    ] {
        wizard.set_field(field, value);
    }
}

fn fill_step_two(wizard: &mut Wizard) {
    wizard.set_category(ApplicantCategory::Employee);
    wizard.set_field(FieldId::MonthlyIncome, "₡850 000");
    wizard.set_field(FieldId::Employer, "Cooperativa Grecia R.L.");
    wizard.set_field(FieldId::Tenure, "38");
    wizard.set_field(FieldId::ContractType, "indefinido");
    wizard.set_amount_text("₡2.500.000");
    wizard.set_term(36);
}

#[tokio::test]
async fn employee_application_is_written_once_and_wizard_resets() {
    init_tracing();
    let repo = Arc::new(RecordingRepository::default());
    let local = Arc::new(MemoryLocalStore::new());
    let orch = orchestrator(repo.clone(), local.clone());
    let mut wizard = Wizard::new();

    fill_step_one(&mut wizard);
    wizard.next().expect("step 1 should validate");
    assert_eq!(wizard.step(), Step::Step2);

    fill_step_two(&mut wizard);
    wizard.next().expect("step 2 should validate");
    assert_eq!(wizard.step(), Step::Step3);
    assert_eq!(wizard.preview().name, "María Fernanda Solís");
    assert_eq!(wizard.preview().phone, "+506 7012-3456");
    assert_eq!(wizard.preview().email, "mfsolis@example.cr");

    wizard.set_consent(true);
    let confirmation = orch.submit(&mut wizard).await.expect("submission");

    let puts = repo.puts();
    assert_eq!(puts.len(), 1);
    let record = &puts[0];
    assert_eq!(record.loan_id, confirmation.loan_id);
    assert_eq!(record.application.principal, 2_500_000);
    assert_eq!(record.application.term_months, 36);
    assert_eq!(record.application.monthly_income, 850_000);
    assert_eq!(record.application.employee.tenure_months, 38);

    let body = record.loan_id.as_str().strip_prefix(LOAN_ID_PREFIX).unwrap();
    assert_eq!(body.len(), LOAN_ID_LEN);
    assert!(body.bytes().all(|b| LOAN_ID_ALPHABET.contains(&b)));

    let doc = serde_json::to_value(record).unwrap();
    assert_eq!(doc["monto"], json!(2_500_000));
    assert_eq!(doc["plazo"], json!(36));
    assert_eq!(doc["loanId"], json!(record.loan_id.as_str()));

    assert_eq!(wizard, Wizard::new());
    assert_eq!(wizard.step(), Step::Step1);
    assert_eq!(wizard.form().value(FieldId::FullName), "");
    assert_eq!(wizard.preview().name, EMPTY_PLACEHOLDER);
    assert_eq!(
        local.get(LAST_LOAN_ID_KEY).unwrap(),
        Some(record.loan_id.to_string())
    );
}

#[tokio::test]
async fn submit_without_consent_touches_nothing() {
    init_tracing();
    let repo = Arc::new(RecordingRepository::default());
    let local = Arc::new(MemoryLocalStore::new());
    let orch = orchestrator(repo.clone(), local.clone());
    let mut wizard = Wizard::new();
    fill_step_one(&mut wizard);
    wizard.next().unwrap();
    fill_step_two(&mut wizard);
    wizard.next().unwrap();
    let before = wizard.clone();

    let err = orch.submit(&mut wizard).await.unwrap_err();

    assert_eq!(err, SubmissionError::ConsentRequired);
    assert_eq!(repo.call_count(), 0);
    assert_eq!(wizard, before);
    assert_eq!(wizard.step(), Step::Step3);
    assert_eq!(wizard.form().value(FieldId::Employer), "Cooperativa Grecia R.L.");
    assert_eq!(local.get(LAST_LOAN_ID_KEY).unwrap(), None);
}

#[test]
fn switching_category_moves_the_step_two_gate() {
    let mut wizard = Wizard::new();
    fill_step_one(&mut wizard);
    wizard.next().unwrap();
    fill_step_two(&mut wizard);

    wizard.set_field(FieldId::Category, "pensionado");
    let failure = wizard.next().unwrap_err();
    assert_eq!(failure.field, FieldId::PensionEntity);
    assert_eq!(failure.reason, FailureReason::Missing);
    assert_eq!(wizard.step(), Step::Step2);

    wizard.set_field(FieldId::Category, "empleado");
    wizard.next().expect("employee fields are still filled in");
    assert_eq!(wizard.step(), Step::Step3);
}

#[test]
fn back_and_forth_keeps_values() {
    let mut wizard = Wizard::new();
    fill_step_one(&mut wizard);
    wizard.next().unwrap();
    fill_step_two(&mut wizard);
    wizard.next().unwrap();

    wizard.back();
    wizard.back();
    assert_eq!(wizard.step(), Step::Step1);
    assert_eq!(wizard.form().value(FieldId::Canton), "Grecia");
    assert_eq!(wizard.terms().principal(), 2_500_000);
}
