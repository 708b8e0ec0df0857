use serde::{Deserialize, Serialize};

use super::step::Step;
use crate::calculations::LoanTerms;
use crate::currency::{EMPTY_PLACEHOLDER, format_crc, preview_text};
use crate::form::{FieldId, FormState, ValidationFailure};

/// Visibility of one step panel and its nav label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    pub step: Step,
    pub visible: bool,
    pub label_active: bool,
}

/// What the adapter shows after entering a step: exactly one panel
/// visible and its label active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepView {
    pub current: Step,
    pub panels: Vec<PanelState>,
}

impl StepView {
    pub fn entering(step: Step) -> Self {
        let panels = Step::all()
            .iter()
            .map(|&s| PanelState {
                step: s,
                visible: s == step,
                label_active: s == step,
            })
            .collect();
        Self {
            current: step,
            panels,
        }
    }
}

/// UI side effect produced by a wizard command. Rendering is up to the
/// adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    ShowStep(StepView),
    ScrollToTop,
    /// Bring the failing control into view and focus it.
    FocusField(FieldId),
    /// Blocking message for the user.
    Alert(String),
}

impl Effect {
    /// Effects for entering `step`.
    pub fn enter(step: Step) -> Vec<Effect> {
        vec![Effect::ShowStep(StepView::entering(step)), Effect::ScrollToTop]
    }

    /// Effects reporting a blocked transition.
    pub fn report(failure: &ValidationFailure) -> Vec<Effect> {
        vec![
            Effect::FocusField(failure.field),
            Effect::Alert(failure.to_string()),
        ]
    }
}

/// Live summary shown on the confirmation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub amount: String,
    pub payment: String,
}

impl Preview {
    pub fn placeholders() -> Self {
        Self {
            name: EMPTY_PLACEHOLDER.to_string(),
            phone: EMPTY_PLACEHOLDER.to_string(),
            email: EMPTY_PLACEHOLDER.to_string(),
            amount: EMPTY_PLACEHOLDER.to_string(),
            payment: EMPTY_PLACEHOLDER.to_string(),
        }
    }

    pub fn capture(
        form: &FormState,
        terms: &LoanTerms,
    ) -> Self {
        Self {
            name: preview_text(form.value(FieldId::FullName)),
            phone: preview_text(form.value(FieldId::Phone)),
            email: preview_text(form.value(FieldId::Email)),
            amount: format_crc(terms.principal()),
            payment: format_crc(terms.payment()),
        }
    }
}

impl Default for Preview {
    fn default() -> Self {
        Self::placeholders()
    }
}
