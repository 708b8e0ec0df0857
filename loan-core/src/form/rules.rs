//! Conditional field rules.
//!
//! Exactly one category group is visible at a time, and only that
//! group's `required` controls are required. Always-visible controls keep
//! their static requiredness.

use tracing::debug;

use super::fields::FIELDS;
use super::fields::FieldId;
use super::state::FormState;
use crate::models::ApplicantCategory;

/// Shows `category`'s group, hides the others, and rebuilds the required
/// set. Calling it again with the same category changes nothing.
pub fn apply_category(
    form: &mut FormState,
    category: ApplicantCategory,
) {
    form.category = category;
    form.visible_group = category;
    form.values
        .insert(FieldId::Category, category.as_str().to_string());

    form.required = FIELDS
        .iter()
        .filter(|spec| spec.required)
        .filter(|spec| spec.group.is_none_or(|group| group == category))
        .map(|spec| spec.id)
        .collect();

    debug!(%category, required = form.required.len(), "applied category rules");
}

/// Applies a raw select value; unknown values fall back to the employee
/// group.
pub fn apply_category_value(
    form: &mut FormState,
    raw: &str,
) {
    apply_category(form, ApplicantCategory::parse_or_default(raw));
}
