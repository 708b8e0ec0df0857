//! Static catalog of the wizard's input controls.
//!
//! The catalog order is the declaration order of the form; the step
//! validator relies on it to report the first failing control.

use serde::{Deserialize, Serialize};

use crate::models::ApplicantCategory;
use crate::wizard::Step;

/// Identifier of a form control. Serialized as the control's form id.
///
/// Variant order must match [`FIELDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldId {
    // Step 1: identity and address
    #[serde(rename = "nombre")]
    FullName,
    #[serde(rename = "cedula")]
    NationalId,
    #[serde(rename = "dob")]
    DateOfBirth,
    #[serde(rename = "telefono")]
    Phone,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "estadoCivil")]
    MaritalStatus,
    #[serde(rename = "provincia")]
    Province,
    #[serde(rename = "canton")]
    Canton,
    #[serde(rename = "distrito")]
    District,

    // Step 2: shared income block
    #[serde(rename = "estatus")]
    Category,
    #[serde(rename = "ingresos")]
    MonthlyIncome,
    #[serde(rename = "banco")]
    Bank,

    // Step 2: employee group
    #[serde(rename = "empleador")]
    Employer,
    #[serde(rename = "antiguedad")]
    Tenure,
    #[serde(rename = "tipoContrato")]
    ContractType,
    #[serde(rename = "bancoSalario")]
    SalaryBank,
    #[serde(rename = "ccss")]
    EmployeeSocialSecurity,

    // Step 2: pensioner group
    #[serde(rename = "entidadPension")]
    PensionEntity,
    #[serde(rename = "tipoPension")]
    PensionType,
    #[serde(rename = "bancoPension")]
    PensionBank,

    // Step 2: independent group
    #[serde(rename = "actividad")]
    Activity,
    #[serde(rename = "regimen")]
    TaxRegime,
    #[serde(rename = "tiempoActividad")]
    ActivityMonths,
    #[serde(rename = "nitenum")]
    Nite,
    #[serde(rename = "ccssIndep")]
    IndependentSocialSecurity,

    // Step 2: business-owner group
    #[serde(rename = "empresa")]
    Company,
    #[serde(rename = "cedulaJuridica")]
    LegalId,
    #[serde(rename = "antiguedadEmpresa")]
    CompanyAge,
    #[serde(rename = "facturacion")]
    MonthlyBilling,
    #[serde(rename = "bancoEmpresa")]
    CompanyBank,
}

/// Constraint a control enforces on its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    /// Calendar date `YYYY-MM-DD`, not in the future.
    Date,
    /// Non-negative whole number (months, counts).
    Count,
    /// Whole colones; grouping characters and the `₡` symbol are allowed.
    Amount,
    /// One of a fixed list of option values.
    Select(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub id: FieldId,
    pub step: Step,
    /// Category group the control lives in; `None` for always-visible controls.
    pub group: Option<ApplicantCategory>,
    pub kind: FieldKind,
    /// For ungrouped controls: always required. For grouped controls:
    /// required while the group is the active one.
    pub required: bool,
    pub label: &'static str,
}

pub const MARITAL_STATUS_OPTIONS: &[&str] =
    &["soltero", "casado", "divorciado", "viudo", "union_libre"];
pub const CATEGORY_OPTIONS: &[&str] = &["empleado", "pensionado", "independiente", "empresario"];
pub const BANK_OPTIONS: &[&str] = &[
    "BNCR",
    "BCR",
    "Banco Popular",
    "BAC",
    "Davivienda",
    "Scotiabank",
    "Promerica",
    "Lafise",
    "Otro",
];
pub const CONTRACT_OPTIONS: &[&str] = &["indefinido", "plazo_fijo", "servicios_profesionales"];
pub const PENSION_ENTITY_OPTIONS: &[&str] =
    &["CCSS", "Magisterio", "Poder Judicial", "Hacienda", "Otra"];
pub const PENSION_TYPE_OPTIONS: &[&str] = &["vejez", "invalidez", "sobrevivencia"];
pub const REGIME_OPTIONS: &[&str] = &["simplificado", "tradicional"];

const fn field(
    id: FieldId,
    step: Step,
    group: Option<ApplicantCategory>,
    kind: FieldKind,
    required: bool,
    label: &'static str,
) -> FieldSpec {
    FieldSpec {
        id,
        step,
        group,
        kind,
        required,
        label,
    }
}

use ApplicantCategory::{BusinessOwner, Employee, Independent, Pensioner};
use FieldKind::{Amount, Count, Date, Phone, Select, Text};
use Step::{Step1, Step2};

/// Every control in declaration order.
pub static FIELDS: &[FieldSpec] = &[
    field(FieldId::FullName, Step1, None, Text, true, "Nombre completo"),
    field(FieldId::NationalId, Step1, None, Text, true, "Cédula"),
    field(FieldId::DateOfBirth, Step1, None, Date, true, "Fecha de nacimiento"),
    field(FieldId::Phone, Step1, None, Phone, true, "Teléfono"),
    field(FieldId::Email, Step1, None, FieldKind::Email, true, "Correo electrónico"),
    field(FieldId::MaritalStatus, Step1, None, Select(MARITAL_STATUS_OPTIONS), true, "Estado civil"),
    field(FieldId::Province, Step1, None, Text, true, "Provincia"),
    field(FieldId::Canton, Step1, None, Text, true, "Cantón"),
    field(FieldId::District, Step1, None, Text, true, "Distrito"),
    //
    field(FieldId::Category, Step2, None, Select(CATEGORY_OPTIONS), true, "Situación laboral"),
    field(FieldId::MonthlyIncome, Step2, None, Amount, true, "Ingresos mensuales"),
    field(FieldId::Bank, Step2, None, Select(BANK_OPTIONS), false, "Banco"),
    //
    field(FieldId::Employer, Step2, Some(Employee), Text, true, "Empleador"),
    field(FieldId::Tenure, Step2, Some(Employee), Count, true, "Antigüedad (meses)"),
    field(FieldId::ContractType, Step2, Some(Employee), Select(CONTRACT_OPTIONS), true, "Tipo de contrato"),
    field(FieldId::SalaryBank, Step2, Some(Employee), Text, false, "Banco donde recibe el salario"),
    field(FieldId::EmployeeSocialSecurity, Step2, Some(Employee), Text, false, "Número de asegurado CCSS"),
    //
    field(FieldId::PensionEntity, Step2, Some(Pensioner), Select(PENSION_ENTITY_OPTIONS), true, "Entidad que paga la pensión"),
    field(FieldId::PensionType, Step2, Some(Pensioner), Select(PENSION_TYPE_OPTIONS), true, "Tipo de pensión"),
    field(FieldId::PensionBank, Step2, Some(Pensioner), Text, false, "Banco donde recibe la pensión"),
    //
    field(FieldId::Activity, Step2, Some(Independent), Text, true, "Actividad"),
    field(FieldId::TaxRegime, Step2, Some(Independent), Select(REGIME_OPTIONS), true, "Régimen tributario"),
    field(FieldId::ActivityMonths, Step2, Some(Independent), Count, true, "Tiempo en la actividad (meses)"),
    field(FieldId::Nite, Step2, Some(Independent), Text, false, "NITE"),
    field(FieldId::IndependentSocialSecurity, Step2, Some(Independent), Text, false, "Número de asegurado CCSS"),
    //
    field(FieldId::Company, Step2, Some(BusinessOwner), Text, true, "Empresa"),
    field(FieldId::LegalId, Step2, Some(BusinessOwner), Text, true, "Cédula jurídica"),
    field(FieldId::CompanyAge, Step2, Some(BusinessOwner), Count, true, "Antigüedad de la empresa (meses)"),
    field(FieldId::MonthlyBilling, Step2, Some(BusinessOwner), Amount, true, "Facturación mensual"),
    field(FieldId::CompanyBank, Step2, Some(BusinessOwner), Text, false, "Banco de la empresa"),
];

impl FieldId {
    pub fn spec(&self) -> &'static FieldSpec {
        // Variants are declared in catalog order.
        &FIELDS[*self as usize]
    }

    /// Form control id, e.g. `"nombre"`.
    pub fn dom_id(&self) -> &'static str {
        match self {
            Self::FullName => "nombre",
            Self::NationalId => "cedula",
            Self::DateOfBirth => "dob",
            Self::Phone => "telefono",
            Self::Email => "email",
            Self::MaritalStatus => "estadoCivil",
            Self::Province => "provincia",
            Self::Canton => "canton",
            Self::District => "distrito",
            Self::Category => "estatus",
            Self::MonthlyIncome => "ingresos",
            Self::Bank => "banco",
            Self::Employer => "empleador",
            Self::Tenure => "antiguedad",
            Self::ContractType => "tipoContrato",
            Self::SalaryBank => "bancoSalario",
            Self::EmployeeSocialSecurity => "ccss",
            Self::PensionEntity => "entidadPension",
            Self::PensionType => "tipoPension",
            Self::PensionBank => "bancoPension",
            Self::Activity => "actividad",
            Self::TaxRegime => "regimen",
            Self::ActivityMonths => "tiempoActividad",
            Self::Nite => "nitenum",
            Self::IndependentSocialSecurity => "ccssIndep",
            Self::Company => "empresa",
            Self::LegalId => "cedulaJuridica",
            Self::CompanyAge => "antiguedadEmpresa",
            Self::MonthlyBilling => "facturacion",
            Self::CompanyBank => "bancoEmpresa",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        FIELDS
            .iter()
            .map(|spec| spec.id)
            .find(|field| field.dom_id() == id)
    }

    pub fn label(&self) -> &'static str {
        self.spec().label
    }
}

/// Controls on `step`, in declaration order.
pub fn fields_for_step(step: Step) -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(move |spec| spec.step == step)
}

/// Controls that belong to `category`'s group.
pub fn group_fields(category: ApplicantCategory) -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS
        .iter()
        .filter(move |spec| spec.group == Some(category))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_field_is_catalogued_once() {
        let ids: HashSet<_> = FIELDS.iter().map(|spec| spec.id).collect();
        assert_eq!(ids.len(), FIELDS.len());
        for spec in FIELDS {
            assert_eq!(spec.id.spec(), spec);
        }
    }

    #[test]
    fn dom_ids_round_trip() {
        for spec in FIELDS {
            assert_eq!(FieldId::from_dom_id(spec.id.dom_id()), Some(spec.id));
        }
        assert_eq!(FieldId::from_dom_id("montoRange"), None);
    }

    #[test]
    fn serde_name_matches_dom_id() {
        for spec in FIELDS {
            let json = serde_json::to_string(&spec.id).unwrap();
            assert_eq!(json, format!("\"{}\"", spec.id.dom_id()));
        }
    }

    #[test]
    fn category_select_lists_every_category() {
        let expected: Vec<_> = ApplicantCategory::all().iter().map(|c| c.as_str()).collect();
        assert_eq!(CATEGORY_OPTIONS, expected.as_slice());
    }

    #[test]
    fn every_category_has_a_group_with_required_fields() {
        for category in ApplicantCategory::all() {
            assert!(group_fields(*category).any(|spec| spec.required));
        }
    }

    #[test]
    fn step_three_has_no_catalogued_controls() {
        assert_eq!(fields_for_step(Step::Step3).count(), 0);
    }
}
