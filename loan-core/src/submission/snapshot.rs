use chrono::NaiveDate;

use crate::currency::parse_crc;
use crate::form::{FieldId, FormState};
use crate::models::{
    Address, BusinessDetails, EmployeeDetails, IndependentDetails, MaritalStatus, NewApplication,
    PensionerDetails,
};
use crate::wizard::Wizard;

/// Copies every control into a [`NewApplication`]. Text is trimmed and
/// numbers fall back to zero instead of failing.
pub fn snapshot(wizard: &Wizard) -> NewApplication {
    let form = wizard.form();
    let text = |field: FieldId| form.value(field).trim().to_string();
    let number = |field: FieldId| parse_crc(form.value(field));
    let terms = wizard.terms();

    NewApplication {
        full_name: text(FieldId::FullName),
        national_id: text(FieldId::NationalId),
        date_of_birth: parse_date(form),
        phone: text(FieldId::Phone),
        email: text(FieldId::Email),
        marital_status: MaritalStatus::parse(form.value(FieldId::MaritalStatus).trim()),
        address: Address {
            province: text(FieldId::Province),
            canton: text(FieldId::Canton),
            district: text(FieldId::District),
        },
        category: form.category(),
        monthly_income: number(FieldId::MonthlyIncome),
        bank: text(FieldId::Bank),
        employee: EmployeeDetails {
            employer: text(FieldId::Employer),
            tenure_months: number(FieldId::Tenure),
            contract_type: text(FieldId::ContractType),
            salary_bank: text(FieldId::SalaryBank),
            social_security_number: text(FieldId::EmployeeSocialSecurity),
        },
        pensioner: PensionerDetails {
            pension_entity: text(FieldId::PensionEntity),
            pension_type: text(FieldId::PensionType),
            pension_bank: text(FieldId::PensionBank),
        },
        independent: IndependentDetails {
            activity: text(FieldId::Activity),
            tax_regime: text(FieldId::TaxRegime),
            activity_months: number(FieldId::ActivityMonths),
            nite: text(FieldId::Nite),
            social_security_number: text(FieldId::IndependentSocialSecurity),
        },
        business: BusinessDetails {
            company: text(FieldId::Company),
            legal_id: text(FieldId::LegalId),
            company_age_months: number(FieldId::CompanyAge),
            monthly_billing: number(FieldId::MonthlyBilling),
            company_bank: text(FieldId::CompanyBank),
        },
        principal: terms.principal(),
        term_months: terms.term_months(),
        estimated_payment: wizard.payment_text(),
    }
}

fn parse_date(form: &FormState) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(form.value(FieldId::DateOfBirth).trim(), "%Y-%m-%d").ok()
}
