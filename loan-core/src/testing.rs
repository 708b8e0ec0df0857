//! Shared fixtures for unit tests.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};

use crate::currency::format_crc;
use crate::db::{ApplicationRepository, InMemoryRepository, RepositoryError};
use crate::form::FieldId;
use crate::local::{LocalStore, LocalStoreError};
use crate::models::{
    Address, ApplicantCategory, ApplicationRecord, BusinessDetails, EmployeeDetails,
    IndependentDetails, LoanId, MaritalStatus, NewApplication, PensionerDetails,
};
use crate::wizard::{Step, Wizard};

pub fn sample_application() -> NewApplication {
    NewApplication {
        full_name: "Ana Mora".to_string(),
        national_id: "1-1234-0567".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 2),
        phone: "8888-1234".to_string(),
        email: "ana@example.com".to_string(),
        marital_status: Some(MaritalStatus::Married),
        address: Address {
            province: "San José".to_string(),
            canton: "Escazú".to_string(),
            district: "San Rafael".to_string(),
        },
        category: ApplicantCategory::Employee,
        monthly_income: 650_000,
        bank: "BNCR".to_string(),
        employee: EmployeeDetails {
            employer: "Acme S.A.".to_string(),
            tenure_months: 24,
            contract_type: "indefinido".to_string(),
            ..EmployeeDetails::default()
        },
        pensioner: PensionerDetails::default(),
        independent: IndependentDetails::default(),
        business: BusinessDetails::default(),
        principal: 300_000,
        term_months: 12,
        estimated_payment: format_crc(26_097),
    }
}

pub fn sample_record(id: &str) -> ApplicationRecord {
    ApplicationRecord::new(
        LoanId::parse(id).unwrap(),
        sample_application(),
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
    )
}

pub fn fill_step_one(wizard: &mut Wizard) {
    wizard.set_field(FieldId::FullName, "Ana Mora");
    wizard.set_field(FieldId::NationalId, "1-1234-0567");
    wizard.set_field(FieldId::DateOfBirth, "1990-04-02");
    wizard.set_field(FieldId::Phone, "8888-1234");
    wizard.set_field(FieldId::Email, "ana@example.com");
    wizard.set_field(FieldId::MaritalStatus, "casado");
    wizard.set_field(FieldId::Province, "San José");
    wizard.set_field(FieldId::Canton, "Escazú");
    wizard.set_field(FieldId::District, "San Rafael");
}

pub fn fill_step_two_employee(wizard: &mut Wizard) {
    wizard.set_category(ApplicantCategory::Employee);
    wizard.set_field(FieldId::MonthlyIncome, "650000");
    wizard.set_field(FieldId::Bank, "BNCR");
    wizard.set_field(FieldId::Employer, "Acme S.A.");
    wizard.set_field(FieldId::Tenure, "24");
    wizard.set_field(FieldId::ContractType, "indefinido");
}

/// Valid employee application on `Step3` with consent given.
pub fn filled_wizard() -> Wizard {
    let mut wizard = Wizard::new();
    fill_step_one(&mut wizard);
    wizard.next().unwrap();
    fill_step_two_employee(&mut wizard);
    wizard.next().unwrap();
    wizard.set_consent(true);
    assert_eq!(wizard.step(), Step::Step3);
    wizard
}

/// Repository that fails `exists` or `put` with a fixed error and
/// otherwise behaves like the in-memory store.
pub struct FailingRepository {
    inner: InMemoryRepository,
    exists_error: Option<RepositoryError>,
    put_error: Option<RepositoryError>,
}

impl FailingRepository {
    pub fn on_exists(err: RepositoryError) -> Self {
        Self {
            inner: InMemoryRepository::new(),
            exists_error: Some(err),
            put_error: None,
        }
    }

    pub fn on_put(err: RepositoryError) -> Self {
        Self {
            inner: InMemoryRepository::new(),
            exists_error: None,
            put_error: Some(err),
        }
    }
}

#[async_trait]
impl ApplicationRepository for FailingRepository {
    async fn exists(
        &self,
        id: &LoanId,
    ) -> Result<bool, RepositoryError> {
        match &self.exists_error {
            Some(err) => Err(err.clone()),
            None => self.inner.exists(id).await,
        }
    }

    async fn put(
        &self,
        id: &LoanId,
        application: NewApplication,
    ) -> Result<ApplicationRecord, RepositoryError> {
        match &self.put_error {
            Some(err) => Err(err.clone()),
            None => self.inner.put(id, application).await,
        }
    }

    async fn get(
        &self,
        id: &LoanId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.get(id).await
    }
}

pub struct FailingLocalStore;

impl LocalStore for FailingLocalStore {
    fn set(
        &self,
        _key: &str,
        _value: &str,
    ) -> Result<(), LocalStoreError> {
        Err(LocalStoreError::Unavailable("storage disabled".to_string()))
    }

    fn get(
        &self,
        _key: &str,
    ) -> Result<Option<String>, LocalStoreError> {
        Err(LocalStoreError::Unavailable("storage disabled".to_string()))
    }
}
