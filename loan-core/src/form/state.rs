use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::fields::{FIELDS, FieldId};
use super::rules;
use crate::models::ApplicantCategory;

/// Current values and visibility/requiredness of every catalogued control.
///
/// Visibility and requiredness are derived by the rules engine from the
/// selected category; callers only change them through
/// [`FormState::set_category`] or by setting [`FieldId::Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub(crate) values: BTreeMap<FieldId, String>,
    pub(crate) category: ApplicantCategory,
    pub(crate) visible_group: ApplicantCategory,
    pub(crate) required: BTreeSet<FieldId>,
}

impl FormState {
    /// Blank form with the default category applied.
    pub fn new() -> Self {
        let mut state = Self {
            values: BTreeMap::new(),
            category: ApplicantCategory::default(),
            visible_group: ApplicantCategory::default(),
            required: BTreeSet::new(),
        };
        rules::apply_category(&mut state, ApplicantCategory::default());
        state
    }

    pub fn value(
        &self,
        field: FieldId,
    ) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Stores raw text for `field`. Setting the category control re-runs
    /// the rules engine.
    pub fn set_value(
        &mut self,
        field: FieldId,
        value: impl Into<String>,
    ) {
        let value = value.into();
        if field == FieldId::Category {
            rules::apply_category_value(self, &value);
        } else {
            self.values.insert(field, value);
        }
    }

    pub fn set_category(
        &mut self,
        category: ApplicantCategory,
    ) {
        rules::apply_category(self, category);
    }

    pub fn category(&self) -> ApplicantCategory {
        self.category
    }

    /// Group currently shown on step 2.
    pub fn visible_group(&self) -> ApplicantCategory {
        self.visible_group
    }

    pub fn is_required(
        &self,
        field: FieldId,
    ) -> bool {
        self.required.contains(&field)
    }

    /// Ungrouped controls are always visible; grouped ones only while
    /// their group is shown.
    pub fn is_visible(
        &self,
        field: FieldId,
    ) -> bool {
        match field.spec().group {
            Some(group) => group == self.visible_group,
            None => true,
        }
    }

    /// Required controls, in declaration order.
    pub fn required_fields(&self) -> Vec<FieldId> {
        FIELDS
            .iter()
            .map(|spec| spec.id)
            .filter(|id| self.required.contains(id))
            .collect()
    }

    /// Restores every control to its default value and re-applies the
    /// default category.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
