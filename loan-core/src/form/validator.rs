//! Per-step validation of the visible required controls.

use std::fmt;
use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::fields::{FieldId, FieldKind, fields_for_step};
use super::state::FormState;
use crate::wizard::Step;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+?506[\s-]?)?[0-9]{4}[\s-]?[0-9]{4}$").expect("valid phone regex")
});

/// `YYYY-MM-DD`, zero-padded.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureReason {
    /// Required control left empty.
    Missing,
    /// Value present but wrong format, out of range, or not an option.
    Invalid,
}

/// First control that blocked a step transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationFailure {
    pub field: FieldId,
    pub reason: FailureReason,
}

impl fmt::Display for ValidationFailure {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.reason {
            FailureReason::Missing => {
                write!(f, "Por favor complete el campo «{}».", self.field.label())
            }
            FailureReason::Invalid => {
                write!(f, "Revise el valor del campo «{}».", self.field.label())
            }
        }
    }
}

impl std::error::Error for ValidationFailure {}

/// Validates `step` against today's date (UTC).
pub fn validate_step(
    form: &FormState,
    step: Step,
) -> Result<(), ValidationFailure> {
    validate_step_on(form, step, Utc::now().date_naive())
}

/// Walks `step`'s controls in declaration order and reports the first
/// visible required control that fails. Later controls are not checked.
pub fn validate_step_on(
    form: &FormState,
    step: Step,
    today: NaiveDate,
) -> Result<(), ValidationFailure> {
    for spec in fields_for_step(step) {
        if !form.is_visible(spec.id) || !form.is_required(spec.id) {
            continue;
        }

        let value = form.value(spec.id).trim();
        let reason = if value.is_empty() {
            Some(FailureReason::Missing)
        } else if !accepts(spec.kind, value, today) {
            Some(FailureReason::Invalid)
        } else {
            None
        };

        if let Some(reason) = reason {
            debug!(field = spec.id.dom_id(), ?reason, %step, "step validation failed");
            return Err(ValidationFailure {
                field: spec.id,
                reason,
            });
        }
    }
    Ok(())
}

fn accepts(
    kind: FieldKind,
    value: &str,
    today: NaiveDate,
) -> bool {
    match kind {
        FieldKind::Text => true,
        FieldKind::Email => EMAIL_RE.is_match(value),
        FieldKind::Phone => PHONE_RE.is_match(value),
        FieldKind::Date => {
            DATE_RE.is_match(value)
                && NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map(|date| date <= today)
                    .unwrap_or(false)
        }
        FieldKind::Count => value.chars().all(|c| c.is_ascii_digit()),
        FieldKind::Amount => is_amount(value),
        FieldKind::Select(options) => options.contains(&value),
    }
}

fn is_amount(value: &str) -> bool {
    let mut digits = value
        .chars()
        .filter(|c| !matches!(c, '₡' | ',' | '.' | '\u{00A0}') && !c.is_whitespace())
        .peekable();
    digits.peek().is_some() && digits.all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::ApplicantCategory;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn step_one_filled() -> FormState {
        let mut form = FormState::new();
        form.set_value(FieldId::FullName, "Ana Mora");
        form.set_value(FieldId::NationalId, "1-1234-5678");
        form.set_value(FieldId::DateOfBirth, "1990-04-12");
        form.set_value(FieldId::Phone, "8888-8888");
        form.set_value(FieldId::Email, "ana@example.com");
        form.set_value(FieldId::MaritalStatus, "casado");
        form.set_value(FieldId::Province, "San José");
        form.set_value(FieldId::Canton, "Escazú");
        form.set_value(FieldId::District, "San Rafael");
        form
    }

    // =========================================================================
    // Step 1
    // =========================================================================

    #[test]
    fn complete_step_one_passes() {
        assert_eq!(validate_step_on(&step_one_filled(), Step::Step1, today()), Ok(()));
    }

    #[test]
    fn empty_form_reports_first_field() {
        let err = validate_step_on(&FormState::new(), Step::Step1, today()).unwrap_err();
        assert_eq!(
            err,
            ValidationFailure {
                field: FieldId::FullName,
                reason: FailureReason::Missing
            }
        );
    }

    #[test]
    fn first_failure_in_declaration_order_wins() {
        let mut form = step_one_filled();
        form.set_value(FieldId::Email, "not-an-email");
        form.set_value(FieldId::Phone, "");

        let err = validate_step_on(&form, Step::Step1, today()).unwrap_err();
        assert_eq!(err.field, FieldId::Phone);
        assert_eq!(err.reason, FailureReason::Missing);
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let mut form = step_one_filled();
        form.set_value(FieldId::Canton, "   ");
        let err = validate_step_on(&form, Step::Step1, today()).unwrap_err();
        assert_eq!(err.field, FieldId::Canton);
        assert_eq!(err.reason, FailureReason::Missing);
    }

    #[test]
    fn future_or_malformed_birth_date_is_invalid() {
        for bad in ["2030-01-01", "1990-02-30", "12/04/1990", "1990-4-2", "90-04-02"] {
            let mut form = step_one_filled();
            form.set_value(FieldId::DateOfBirth, bad);
            let err = validate_step_on(&form, Step::Step1, today()).unwrap_err();
            assert_eq!(err.field, FieldId::DateOfBirth, "{bad}");
            assert_eq!(err.reason, FailureReason::Invalid);
        }
    }

    #[test]
    fn phone_formats() {
        for ok in ["88888888", "8888 8888", "+506 8888-8888", "5068888-8888"] {
            assert!(PHONE_RE.is_match(ok), "{ok}");
        }
        for bad in [
            "888",
            "8888-88888",
            "+1 555 555 5555",
            "\u{668}\u{668}\u{668}\u{668}\u{668}\u{668}\u{668}\u{668}",
            "+506 \u{968}\u{968}\u{968}\u{968}-8888",
        ] {
            assert!(!PHONE_RE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn non_ascii_digits_are_not_a_phone() {
        let mut form = step_one_filled();
        form.set_value(FieldId::Phone, "\u{668}\u{668}\u{668}\u{668}\u{668}\u{668}\u{668}\u{668}");
        let err = validate_step_on(&form, Step::Step1, today()).unwrap_err();
        assert_eq!(err.field, FieldId::Phone);
        assert_eq!(err.reason, FailureReason::Invalid);
    }

    #[test]
    fn select_value_must_be_an_option() {
        let mut form = step_one_filled();
        form.set_value(FieldId::MaritalStatus, "comprometido");
        let err = validate_step_on(&form, Step::Step1, today()).unwrap_err();
        assert_eq!(err.field, FieldId::MaritalStatus);
        assert_eq!(err.reason, FailureReason::Invalid);
    }

    // =========================================================================
    // Step 2
    // =========================================================================

    #[test]
    fn hidden_group_is_skipped() {
        let mut form = FormState::new();
        form.set_category(ApplicantCategory::Pensioner);
        form.set_value(FieldId::MonthlyIncome, "₡450 000");
        form.set_value(FieldId::PensionEntity, "CCSS");
        form.set_value(FieldId::PensionType, "vejez");

        // Employee group is empty but hidden.
        assert_eq!(validate_step_on(&form, Step::Step2, today()), Ok(()));
    }

    #[test]
    fn active_group_required_fields_are_checked() {
        let mut form = FormState::new();
        form.set_value(FieldId::MonthlyIncome, "600000");
        form.set_value(FieldId::Employer, "Acme");
        form.set_value(FieldId::Tenure, "doce");

        let err = validate_step_on(&form, Step::Step2, today()).unwrap_err();
        assert_eq!(err.field, FieldId::Tenure);
        assert_eq!(err.reason, FailureReason::Invalid);
    }

    #[test]
    fn optional_fields_never_block() {
        let mut form = FormState::new();
        form.set_value(FieldId::MonthlyIncome, "600000");
        form.set_value(FieldId::Bank, "banco inventado");
        form.set_value(FieldId::Employer, "Acme");
        form.set_value(FieldId::Tenure, "24");
        form.set_value(FieldId::ContractType, "indefinido");

        assert_eq!(validate_step_on(&form, Step::Step2, today()), Ok(()));
    }

    #[test]
    fn amount_accepts_grouping_and_symbol() {
        assert!(is_amount("₡1\u{00A0}250\u{00A0}000"));
        assert!(is_amount("1,250,000"));
        assert!(is_amount("1.250.000"));
        assert!(!is_amount("₡"));
        assert!(!is_amount("12a"));
        assert!(!is_amount("-5"));
    }

    #[test]
    fn step_three_always_passes() {
        assert_eq!(validate_step_on(&FormState::new(), Step::Step3, today()), Ok(()));
    }

    #[test]
    fn failure_message_names_the_field() {
        let failure = ValidationFailure {
            field: FieldId::Email,
            reason: FailureReason::Invalid,
        };
        assert_eq!(
            failure.to_string(),
            "Revise el valor del campo «Correo electrónico»."
        );
    }
}
