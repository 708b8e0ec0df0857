use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{ApplicantCategory, LoanId, MaritalStatus};
use crate::currency::format_crc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "provincia")]
    pub province: String,
    #[serde(rename = "canton")]
    pub canton: String,
    #[serde(rename = "distrito")]
    pub district: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDetails {
    #[serde(rename = "empleador")]
    pub employer: String,
    #[serde(rename = "antiguedadMeses")]
    pub tenure_months: u64,
    #[serde(rename = "tipoContrato")]
    pub contract_type: String,
    #[serde(rename = "bancoSalario")]
    pub salary_bank: String,
    #[serde(rename = "ccssAsegurado")]
    pub social_security_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionerDetails {
    #[serde(rename = "entidadPension")]
    pub pension_entity: String,
    #[serde(rename = "tipoPension")]
    pub pension_type: String,
    #[serde(rename = "bancoPension")]
    pub pension_bank: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndependentDetails {
    #[serde(rename = "actividad")]
    pub activity: String,
    #[serde(rename = "regimen")]
    pub tax_regime: String,
    #[serde(rename = "tiempoActividadMeses")]
    pub activity_months: u64,
    #[serde(rename = "nite")]
    pub nite: String,
    #[serde(rename = "ccssIndependiente")]
    pub social_security_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDetails {
    #[serde(rename = "empresa")]
    pub company: String,
    #[serde(rename = "cedulaJuridica")]
    pub legal_id: String,
    #[serde(rename = "antiguedadEmpresaMeses")]
    pub company_age_months: u64,
    #[serde(rename = "facturacionMensual")]
    pub monthly_billing: u64,
    #[serde(rename = "bancoEmpresa")]
    pub company_bank: String,
}

/// Application document before it is written (no id or timestamp).
///
/// Every category block is always present; only the block matching
/// `category` is expected to carry data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    #[serde(rename = "nombre")]
    pub full_name: String,
    #[serde(rename = "cedula")]
    pub national_id: String,
    #[serde(rename = "dob")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(rename = "telefono")]
    pub phone: String,
    pub email: String,
    #[serde(rename = "estadoCivil")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(rename = "direccion")]
    pub address: Address,

    #[serde(rename = "estatus")]
    pub category: ApplicantCategory,
    #[serde(rename = "ingresosMensuales")]
    pub monthly_income: u64,
    #[serde(rename = "banco")]
    pub bank: String,

    #[serde(flatten)]
    pub employee: EmployeeDetails,
    #[serde(flatten)]
    pub pensioner: PensionerDetails,
    #[serde(flatten)]
    pub independent: IndependentDetails,
    #[serde(flatten)]
    pub business: BusinessDetails,

    // Loan terms
    #[serde(rename = "monto")]
    pub principal: u64,
    #[serde(rename = "plazo")]
    pub term_months: u32,
    #[serde(rename = "cuotaEstimada")]
    pub estimated_payment: String,
}

/// A persisted application. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    #[serde(rename = "loanId")]
    pub loan_id: LoanId,
    #[serde(flatten)]
    pub application: NewApplication,
    /// Assigned by the store at write time.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl ApplicationRecord {
    pub fn new(
        loan_id: LoanId,
        application: NewApplication,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            loan_id,
            application,
            created_at,
        }
    }
}

impl fmt::Display for ApplicationRecord {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let app = &self.application;
        writeln!(f, "Loan ID:        {}", self.loan_id)?;
        writeln!(f, "Created:        {}", self.created_at.to_rfc3339())?;
        writeln!(f, "Name:           {}", app.full_name)?;
        writeln!(f, "National ID:    {}", app.national_id)?;
        writeln!(f, "Phone:          {}", app.phone)?;
        writeln!(f, "Email:          {}", app.email)?;
        writeln!(
            f,
            "Address:        {}, {}, {}",
            app.address.district, app.address.canton, app.address.province
        )?;
        writeln!(f, "Category:       {}", app.category.label())?;
        writeln!(f, "Monthly income: {}", format_crc(app.monthly_income))?;
        writeln!(f, "Principal:      {}", format_crc(app.principal))?;
        writeln!(f, "Term:           {} months", app.term_months)?;
        write!(f, "Payment:        {}", app.estimated_payment)
    }
}
