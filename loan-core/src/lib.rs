//! Engine behind the instant personal-loan application wizard.
//!
//! Everything here is headless: adapters feed input into a [`Wizard`],
//! render the [`Effect`]s it returns, and hand the finished wizard to a
//! [`SubmissionOrchestrator`].

pub mod allocator;
pub mod calculations;
pub mod currency;
pub mod db;
pub mod form;
pub mod links;
pub mod local;
pub mod models;
pub mod submission;
pub mod wizard;

#[cfg(test)]
mod testing;

pub use allocator::{Allocation, AllocationError, IdAllocator};
pub use db::{ApplicationRepository, DbConfig, RepositoryError, RepositoryRegistry};
pub use form::{FieldId, ValidationFailure};
pub use models::*;
pub use submission::{Confirmation, FailureNotice, SubmissionError, SubmissionOrchestrator};
pub use wizard::{Effect, Step, Wizard};
