use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::allocator::AllocationError;
use crate::db::RepositoryError;
use crate::links::ContactLinks;
use crate::models::{ApplicationRecord, LoanId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Debés autorizar la verificación de datos.")]
    ConsentRequired,

    #[error("Ya hay un envío en curso.")]
    AlreadySubmitting,

    #[error("La solicitud solo se puede enviar desde el paso de confirmación.")]
    NotOnConfirmationStep,

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("{0}")]
    Persistence(#[source] RepositoryError),
}

impl SubmissionError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConsentRequired => "consent-required",
            Self::AlreadySubmitting => "already-submitting",
            Self::NotOnConfirmationStep => "not-on-confirmation-step",
            Self::Allocation(err) => err.code(),
            Self::Persistence(err) => err.code(),
        }
    }

    /// Whether the applicant can fix this without contacting anyone.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ConsentRequired | Self::AlreadySubmitting | Self::NotOnConfirmationStep
        )
    }
}

/// Blocking failure message for store errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureNotice {
    pub title: String,
    pub code: String,
    pub message: String,
    pub hints: Vec<String>,
}

const FAILURE_TITLE: &str = "Error al enviar";

const FAILURE_HINTS: &[&str] = &[
    "Verificá tu conexión e intentá enviar de nuevo; tus datos se conservaron.",
    "Revisá que el almacén de solicitudes permita crear documentos en /applications.",
    "Confirmá el backend y la cadena de conexión en la configuración.",
];

impl FailureNotice {
    /// Notice for a store failure; `None` for errors the applicant fixes
    /// in the form.
    pub fn for_error(err: &SubmissionError) -> Option<Self> {
        (!err.is_user_error()).then(|| Self::from_error(err))
    }

    pub fn from_error(err: &SubmissionError) -> Self {
        let message = match err {
            SubmissionError::Allocation(AllocationError::Store(inner))
            | SubmissionError::Persistence(inner) => inner.to_string(),
            other => other.to_string(),
        };
        Self {
            title: FAILURE_TITLE.to_string(),
            code: err.code().to_string(),
            message,
            hints: FAILURE_HINTS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl fmt::Display for FailureNotice {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}: {}", self.title, self.code)?;
        writeln!(f, "{}", self.message)?;
        writeln!(f)?;
        write!(f, "Sugerencias:")?;
        for hint in &self.hints {
            write!(f, "\n- {hint}")?;
        }
        Ok(())
    }
}

/// Shown after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub loan_id: LoanId,
    /// Text placed on the clipboard by the copy action.
    pub copy_text: String,
    pub links: ContactLinks,
    /// `false` when the id is the unchecked long fallback.
    pub verified: bool,
    pub record: ApplicationRecord,
}
