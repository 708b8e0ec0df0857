use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use loan_core::allocator::CandidateSource;
use loan_core::calculations::LoanTerms;
use loan_core::currency::format_crc;
use loan_core::local::{LAST_LOAN_ID_KEY, LocalStore};
use loan_core::submission::{Confirmation, FailureNotice, SubmissionError, SubmissionOrchestrator};
use loan_core::wizard::{Effect, Step, Wizard};
use loan_core::{ApplicationRecord, ApplicationRepository, DbConfig, LoanId, RepositoryRegistry, ValidationFailure};
use loan_db_sqlite::SqliteRepositoryFactory;
use tracing::{debug, info};

use crate::answers::Answers;
use crate::config::AppConfig;
use crate::local_store::FileLocalStore;

/// Registry with every backend this binary ships: `memory` and `sqlite`.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::with_builtin_backends();
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

pub async fn open_repository(config: &DbConfig) -> Result<Arc<dyn ApplicationRepository>> {
    debug!("connecting to {} backend", config.backend);
    let repo = build_registry()
        .create(config)
        .await
        .with_context(|| format!("Failed to open '{}' application store", config.backend))?;
    Ok(Arc::from(repo))
}

/// Orchestrator wired to `repo` and the configured local store, contacts
/// and overlay time.
pub fn build_orchestrator(
    config: &AppConfig,
    repo: Arc<dyn ApplicationRepository>,
) -> SubmissionOrchestrator {
    let local = Arc::new(FileLocalStore::new(config.local_store.path.clone()));
    SubmissionOrchestrator::new(repo, local)
        .contact(config.contact.clone())
        .config(config.submission.to_config())
}

// ─── quote ───────────────────────────────────────────────────────────────────

/// Clamped terms and estimated payment for typed amount and term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub terms: LoanTerms,
    pub payment: u64,
}

/// Feeds the text through the wizard's amount and term controls.
pub fn quote(
    amount: Option<&str>,
    term: Option<&str>,
) -> Quote {
    let mut wizard = Wizard::new();
    if let Some(amount) = amount {
        wizard.set_amount_text(amount);
    }
    if let Some(term) = term {
        wizard.set_term_text(term);
    }
    let terms = wizard.terms();
    Quote {
        terms,
        payment: terms.payment(),
    }
}

impl fmt::Display for Quote {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Monto:          {}", format_crc(self.terms.principal()))?;
        writeln!(f, "Plazo:          {} meses", self.terms.term_months())?;
        write!(f, "Cuota estimada: {}", format_crc(self.payment))
    }
}

// ─── apply ───────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApplyOutcome {
    /// A step did not validate; the wizard stopped on it.
    Incomplete {
        step: Step,
        failure: ValidationFailure,
    },
    /// Rejected before touching the store (missing consent).
    Rejected(SubmissionError),
    /// The store failed; the answers were kept.
    Failed(FailureNotice),
    Submitted(Box<Confirmation>),
}

impl ApplyOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Self::Submitted(_))
    }
}

/// What the applicant would have seen, plus the final outcome.
#[derive(Debug)]
pub struct ApplyReport {
    pub transcript: Vec<String>,
    pub outcome: ApplyOutcome,
}

/// Fills a fresh wizard from `answers`, walks it to the confirmation step
/// and submits.
pub async fn apply<C: CandidateSource>(
    orchestrator: &SubmissionOrchestrator<C>,
    answers: &Answers,
    force_consent: bool,
) -> ApplyReport {
    let mut wizard = Wizard::new();
    let mut transcript = render_effects(&Effect::enter(Step::Step1));

    answers.fill(&mut wizard);
    if force_consent {
        wizard.set_consent(true);
    }

    while wizard.step() != Step::Step3 {
        match wizard.next() {
            Ok(effects) => transcript.extend(render_effects(&effects)),
            Err(failure) => {
                transcript.extend(render_effects(&Effect::report(&failure)));
                return ApplyReport {
                    transcript,
                    outcome: ApplyOutcome::Incomplete {
                        step: wizard.step(),
                        failure,
                    },
                };
            }
        }
    }

    let preview = wizard.preview();
    transcript.push(format!("Solicitante: {}", preview.name));
    transcript.push(format!("Monto: {}", preview.amount));
    transcript.push(format!("Plazo: {} meses", wizard.terms().term_months()));
    transcript.push(format!("Cuota estimada: {}", preview.payment));

    let outcome = match orchestrator.submit(&mut wizard).await {
        Ok(confirmation) => ApplyOutcome::Submitted(Box::new(confirmation)),
        Err(err) => match FailureNotice::for_error(&err) {
            Some(notice) => ApplyOutcome::Failed(notice),
            None => ApplyOutcome::Rejected(err),
        },
    };
    ApplyReport {
        transcript,
        outcome,
    }
}

/// Text rendering of wizard effects for a terminal.
pub fn render_effects(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::ShowStep(view) => Some(format!("== {} ==", view.current)),
            Effect::ScrollToTop => None,
            Effect::FocusField(field) => Some(format!("-> {}", field.dom_id())),
            Effect::Alert(message) => Some(format!("!! {message}")),
        })
        .collect()
}

impl fmt::Display for ApplyOutcome {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Incomplete { step, failure } => {
                write!(f, "Paso incompleto ({step}): {failure}")
            }
            Self::Rejected(err) => write!(f, "{err}"),
            Self::Failed(notice) => write!(f, "{notice}"),
            Self::Submitted(confirmation) => write_confirmation(f, confirmation),
        }
    }
}

fn write_confirmation(
    f: &mut fmt::Formatter<'_>,
    confirmation: &Confirmation,
) -> fmt::Result {
    writeln!(f, "¡Solicitud enviada!")?;
    writeln!(f, "Código de solicitud: {}", confirmation.loan_id)?;
    if !confirmation.verified {
        writeln!(f, "(código sin verificar contra solicitudes existentes)")?;
    }
    writeln!(f)?;
    writeln!(f, "WhatsApp:  {}", confirmation.links.whatsapp)?;
    writeln!(f, "Messenger: {}", confirmation.links.messenger)?;
    writeln!(f, "Correo:    {}", confirmation.links.email)?;
    writeln!(f)?;
    write!(f, "{}", confirmation.record)
}

// ─── show ────────────────────────────────────────────────────────────────────

/// Loads one stored application. Without an explicit id, the id last
/// remembered in `local` is used.
pub async fn show(
    repo: &dyn ApplicationRepository,
    local: &dyn LocalStore,
    loan_id: Option<&str>,
) -> Result<ApplicationRecord> {
    let raw = match loan_id {
        Some(id) => id.to_string(),
        None => local
            .get(LAST_LOAN_ID_KEY)
            .context("Failed to read the remembered loan id")?
            .context("No loan id given and none remembered on this device")?,
    };
    let id = LoanId::parse(raw.trim()).with_context(|| format!("Invalid loan id '{raw}'"))?;

    info!(%id, "loading application");
    repo.get(&id)
        .await
        .with_context(|| format!("Failed to load application {id}"))?
        .with_context(|| format!("No application stored under {id}"))
}
