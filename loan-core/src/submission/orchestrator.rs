use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{Instant, sleep_until};
use tracing::{error, info, warn};

use super::notice::{Confirmation, SubmissionError};
use super::snapshot::snapshot;
use crate::allocator::{CandidateSource, IdAllocator, ThreadRngCandidates};
use crate::db::ApplicationRepository;
use crate::links::{ContactConfig, ContactLinks};
use crate::local::{LAST_LOAN_ID_KEY, LocalStore};
use crate::models::{ApplicationRecord, NewApplication};
use crate::wizard::{Phase, Step, Wizard};

pub const DEFAULT_MIN_OVERLAY_MS: u64 = 4_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Shortest time the submitting overlay stays up after a successful
    /// write.
    pub min_overlay: Duration,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            min_overlay: Duration::from_millis(DEFAULT_MIN_OVERLAY_MS),
        }
    }
}

/// Snapshot taken by [`SubmissionOrchestrator::begin`].
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    application: NewApplication,
    started: Instant,
}

impl PendingSubmission {
    pub fn application(&self) -> &NewApplication {
        &self.application
    }
}

/// Successful write plus whether its id was verified unique.
#[derive(Debug, Clone)]
pub struct Written {
    pub record: ApplicationRecord,
    pub verified: bool,
}

/// Drives one submission from the confirmation step to the store.
pub struct SubmissionOrchestrator<C = ThreadRngCandidates> {
    repo: Arc<dyn ApplicationRepository>,
    local: Arc<dyn LocalStore>,
    allocator: IdAllocator<C>,
    contact: ContactConfig,
    config: SubmissionConfig,
}

impl SubmissionOrchestrator<ThreadRngCandidates> {
    pub fn new(
        repo: Arc<dyn ApplicationRepository>,
        local: Arc<dyn LocalStore>,
    ) -> Self {
        Self::with_allocator(repo, local, IdAllocator::new())
    }
}

impl<C: CandidateSource> SubmissionOrchestrator<C> {
    pub fn with_allocator(
        repo: Arc<dyn ApplicationRepository>,
        local: Arc<dyn LocalStore>,
        allocator: IdAllocator<C>,
    ) -> Self {
        Self {
            repo,
            local,
            allocator,
            contact: ContactConfig::default(),
            config: SubmissionConfig::default(),
        }
    }

    pub fn contact(
        mut self,
        contact: ContactConfig,
    ) -> Self {
        self.contact = contact;
        self
    }

    pub fn config(
        mut self,
        config: SubmissionConfig,
    ) -> Self {
        self.config = config;
        self
    }

    /// Allocate, write, and apply the outcome to `wizard`.
    pub async fn submit(
        &self,
        wizard: &mut Wizard,
    ) -> Result<Confirmation, SubmissionError> {
        let pending = self.begin(wizard)?;
        let result = self.run(pending).await;
        self.finish(wizard, result)
    }

    /// Checks the guard, the current step and consent, snapshots the form
    /// and enters the submitting phase. On error the wizard is untouched.
    pub fn begin(
        &self,
        wizard: &mut Wizard,
    ) -> Result<PendingSubmission, SubmissionError> {
        if wizard.is_submitting() {
            return Err(SubmissionError::AlreadySubmitting);
        }
        if wizard.step() != Step::Step3 {
            return Err(SubmissionError::NotOnConfirmationStep);
        }
        if !wizard.consent() {
            return Err(SubmissionError::ConsentRequired);
        }

        let application = snapshot(wizard);
        wizard.set_phase(Phase::Submitting);
        Ok(PendingSubmission {
            application,
            started: Instant::now(),
        })
    }

    /// Allocates an id and writes the record. On success, waits until the
    /// minimum overlay time has passed since `begin`.
    pub async fn run(
        &self,
        pending: PendingSubmission,
    ) -> Result<Written, SubmissionError> {
        let allocation = self.allocator.allocate(self.repo.as_ref()).await?;
        let record = self
            .repo
            .put(&allocation.id, pending.application)
            .await
            .map_err(SubmissionError::Persistence)?;

        sleep_until(pending.started + self.config.min_overlay).await;
        Ok(Written {
            record,
            verified: allocation.verified,
        })
    }

    /// Leaves the submitting phase. On success resets the wizard and
    /// remembers the id locally; on failure keeps every value and stays
    /// on `Step3`.
    pub fn finish(
        &self,
        wizard: &mut Wizard,
        result: Result<Written, SubmissionError>,
    ) -> Result<Confirmation, SubmissionError> {
        wizard.set_phase(Phase::Editing);

        let written = match result {
            Ok(written) => written,
            Err(err) => {
                error!(code = err.code(), error = %err, "submission failed");
                return Err(err);
            }
        };

        let loan_id = written.record.loan_id.clone();
        info!(%loan_id, verified = written.verified, "application submitted");

        wizard.reset();
        if let Err(err) = self.local.set(LAST_LOAN_ID_KEY, loan_id.as_str()) {
            warn!(%loan_id, error = %err, "could not remember loan id locally");
        }

        Ok(Confirmation {
            copy_text: loan_id.to_string(),
            links: ContactLinks::for_loan(&loan_id, &self.contact),
            verified: written.verified,
            record: written.record,
            loan_id,
        })
    }
}
