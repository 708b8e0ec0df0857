//! Submission of a completed application.
//!
//! [`SubmissionOrchestrator::submit`] is `begin` + `run` + `finish`.
//! `run` does not borrow the wizard, so an adapter can keep handling
//! input (and reject a second submit) while the store call is pending.

mod notice;
mod orchestrator;
mod snapshot;

pub use notice::{Confirmation, FailureNotice, SubmissionError};
pub use orchestrator::{
    DEFAULT_MIN_OVERLAY_MS, PendingSubmission, SubmissionConfig, SubmissionOrchestrator, Written,
};
pub use snapshot::snapshot;
