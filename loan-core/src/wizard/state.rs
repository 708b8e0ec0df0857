use serde::{Deserialize, Serialize};
use tracing::debug;

use super::step::Step;
use super::view::{Effect, Preview};
use crate::calculations::LoanTerms;
use crate::calculations::amortization::TERM_DEFAULT;
use crate::currency::{format_crc, parse_crc};
use crate::form::{FieldId, FormState, ValidationFailure, validate_step};
use crate::models::ApplicantCategory;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Editing,
    /// A submission is in flight; the form ignores input.
    Submitting,
}

/// The whole client-side state of one application in progress.
///
/// Adapters call the command methods and render the returned [`Effect`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wizard {
    form: FormState,
    terms: LoanTerms,
    consent: bool,
    step: Step,
    preview: Preview,
    phase: Phase,
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            form: FormState::new(),
            terms: LoanTerms::default(),
            consent: false,
            step: Step::Step1,
            preview: Preview::placeholders(),
            phase: Phase::Editing,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn terms(&self) -> LoanTerms {
        self.terms
    }

    pub fn consent(&self) -> bool {
        self.consent
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Estimated payment as displayed next to the sliders.
    pub fn payment_text(&self) -> String {
        format_crc(self.terms.payment())
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Moves forward one step if the current step validates.
    ///
    /// From `Step3` there is nowhere to go; submission is handled by the
    /// orchestrator.
    pub fn next(&mut self) -> Result<Vec<Effect>, ValidationFailure> {
        if self.is_submitting() {
            return Ok(Vec::new());
        }
        let Some(target) = self.step.next() else {
            return Ok(Vec::new());
        };

        validate_step(&self.form, self.step)?;

        if target == Step::Step3 {
            self.refresh_preview();
        }
        Ok(self.enter(target))
    }

    /// Moves back one step. Never validates.
    pub fn back(&mut self) -> Vec<Effect> {
        if self.is_submitting() {
            return Vec::new();
        }
        match self.step.previous() {
            Some(target) => self.enter(target),
            None => Vec::new(),
        }
    }

    fn enter(
        &mut self,
        step: Step,
    ) -> Vec<Effect> {
        debug!(from = %self.step, to = %step, "wizard step change");
        self.step = step;
        Effect::enter(step)
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    pub fn set_field(
        &mut self,
        field: FieldId,
        value: impl Into<String>,
    ) {
        if self.is_submitting() {
            debug!(field = field.dom_id(), "input ignored while submitting");
            return;
        }
        self.form.set_value(field, value);
    }

    pub fn set_category(
        &mut self,
        category: ApplicantCategory,
    ) {
        if self.is_submitting() {
            return;
        }
        self.form.set_category(category);
    }

    /// Amount typed as text; anything non-numeric is dropped and the
    /// result clamped into bounds.
    pub fn set_amount_text(
        &mut self,
        text: &str,
    ) {
        self.set_amount(parse_crc(text));
    }

    /// Amount from the slider.
    pub fn set_amount(
        &mut self,
        principal: u64,
    ) {
        if self.is_submitting() {
            return;
        }
        self.terms = self.terms.with_principal(principal);
        self.refresh_preview();
    }

    /// Term typed as text. Blank text means the default term.
    pub fn set_term_text(
        &mut self,
        text: &str,
    ) {
        let months = if text.trim().is_empty() {
            TERM_DEFAULT
        } else {
            u32::try_from(parse_crc(text)).unwrap_or(u32::MAX)
        };
        self.set_term(months);
    }

    /// Term from the slider.
    pub fn set_term(
        &mut self,
        months: u32,
    ) {
        if self.is_submitting() {
            return;
        }
        self.terms = self.terms.with_term(months);
        self.refresh_preview();
    }

    pub fn set_consent(
        &mut self,
        consent: bool,
    ) {
        if self.is_submitting() {
            return;
        }
        self.consent = consent;
    }

    fn refresh_preview(&mut self) {
        self.preview = Preview::capture(&self.form, &self.terms);
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Restores every control, the loan terms, consent and the preview to
    /// their defaults and returns to `Step1`.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.form.reset();
        self.terms = LoanTerms::default();
        self.consent = false;
        self.preview = Preview::placeholders();
        self.phase = Phase::Editing;
        self.enter(Step::Step1)
    }

    pub(crate) fn set_phase(
        &mut self,
        phase: Phase,
    ) {
        debug!(?phase, "wizard phase change");
        self.phase = phase;
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}
