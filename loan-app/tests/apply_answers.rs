//! Answers-file submissions through the configured SQLite store.

use std::path::{Path, PathBuf};

use loan_app::answers::Answers;
use loan_app::app::{self, ApplyOutcome};
use loan_app::config::AppConfig;
use loan_app::local_store::FileLocalStore;
use loan_core::ApplicationRepository;
use loan_core::form::FieldId;
use loan_core::local::{LAST_LOAN_ID_KEY, LocalStore};
use loan_core::models::ApplicantCategory;
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn config_with_local_store(name: &str) -> AppConfig {
    let mut config = AppConfig::load(&fixture("loan-wizard.toml")).expect("fixture config");
    let path = std::env::temp_dir().join(format!(
        "loan-wizard-it-{}-{name}.toml",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    config.local_store.path = path;
    config
}

#[test]
fn fixture_config_is_read() {
    let config = AppConfig::load(&fixture("loan-wizard.toml")).unwrap();
    assert_eq!(config.database.backend, "sqlite");
    assert_eq!(config.database.connection_string, ":memory:");
    assert_eq!(config.submission.min_overlay_ms, 0);
    assert_eq!(config.contact.whatsapp_number, "50688887777");
}

#[test]
fn fixture_answers_parse() {
    let answers = Answers::load(&fixture("answers_empresario.toml")).unwrap();
    assert_eq!(answers.fields.get(&FieldId::Category).map(String::as_str), Some("empresario"));
    assert_eq!(answers.fields.get(&FieldId::DateOfBirth).map(String::as_str), Some("1988-07-14"));
    assert_eq!(answers.amount.as_deref(), Some("₡5.000.000"));
    assert!(answers.consent);
}

#[tokio::test]
async fn business_owner_answers_are_stored_and_shown() {
    let config = config_with_local_store("business");
    let repo = app::open_repository(&config.database).await.expect("open store");
    let orchestrator = app::build_orchestrator(&config, repo.clone());
    let answers = Answers::load(&fixture("answers_empresario.toml")).unwrap();

    let report = app::apply(&orchestrator, &answers, false).await;

    let ApplyOutcome::Submitted(confirmation) = &report.outcome else {
        panic!("expected a submission, got {}", report.outcome);
    };
    assert_eq!(
        report.transcript[..3].to_vec(),
        vec![
            "== 1. Datos personales ==".to_string(),
            "== 2. Ingresos y préstamo ==".to_string(),
            "== 3. Confirmación ==".to_string(),
        ]
    );
    assert!(report.transcript.contains(&"Cuota estimada: ₡156\u{a0}682".to_string()));
    assert!(confirmation.links.whatsapp.starts_with("https://wa.me/50688887777?text="));

    let stored = repo
        .get(&confirmation.loan_id)
        .await
        .unwrap()
        .expect("record present");
    let application = &stored.application;
    assert_eq!(application.category, ApplicantCategory::BusinessOwner);
    assert_eq!(application.business.company, "Surf & Café Nosara S.R.L.");
    assert_eq!(application.business.company_age_months, 54);
    assert_eq!(application.business.monthly_billing, 4_500_000);
    assert_eq!(application.monthly_income, 1_200_000);
    assert_eq!(application.employee.employer, "Hotel Playa");
    assert_eq!(application.principal, 5_000_000);
    assert_eq!(application.term_months, 36);

    let local = FileLocalStore::new(config.local_store.path.clone());
    assert_eq!(
        local.get(LAST_LOAN_ID_KEY).unwrap(),
        Some(confirmation.loan_id.to_string())
    );
    let shown = app::show(repo.as_ref(), &local, None).await.unwrap();
    assert_eq!(shown, stored);

    let _ = std::fs::remove_file(&config.local_store.path);
}

#[tokio::test]
async fn invalid_answer_stops_on_its_step() {
    let config = config_with_local_store("invalid");
    let repo = app::open_repository(&config.database).await.expect("open store");
    let orchestrator = app::build_orchestrator(&config, repo);
    let mut answers = Answers::load(&fixture("answers_empresario.toml")).unwrap();
    answers.fields.insert(FieldId::Email, "rocio-at-example".to_string());

    let report = app::apply(&orchestrator, &answers, true).await;

    let ApplyOutcome::Incomplete { step, failure } = &report.outcome else {
        panic!("expected a validation stop, got {}", report.outcome);
    };
    assert_eq!(step.index(), 0);
    assert_eq!(failure.field, FieldId::Email);
    assert_eq!(
        report.transcript.last().map(String::as_str),
        Some("!! Revise el valor del campo «Correo electrónico».")
    );
    assert!(!config.local_store.path.exists());
}

#[tokio::test]
async fn unknown_backend_is_a_configuration_error() {
    let config = AppConfig::default().with_overrides(Some("firestore".into()), None);
    let err = app::open_repository(&config.database).await.err().expect("must fail");
    assert!(format!("{err:#}").contains("unknown backend 'firestore'"), "{err:#}");
}
