use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use loan_app::answers::Answers;
use loan_app::config::{AppConfig, DEFAULT_CONFIG_PATH};
use loan_app::local_store::FileLocalStore;
use loan_app::{app, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Instant personal-loan application wizard.
///
/// Quotes monthly payments, submits applications from an answers file and
/// looks up submitted applications by code.
#[derive(Debug, Parser)]
#[command(name = "loan-wizard", version)]
struct Cli {
    /// Configuration file. Missing file means built-in defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Application store backend (`sqlite` or `memory`).
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Store connection string.
    /// For SQLite this is a file path (e.g. `applications.db`) or `:memory:`.
    #[arg(long, global = true)]
    db: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `loan_core=trace`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimated monthly payment for an amount and term.
    Quote {
        /// Requested amount, e.g. `₡2.500.000` or `2500000`.
        #[arg(long)]
        amount: Option<String>,

        /// Term in months.
        #[arg(long)]
        term: Option<String>,
    },

    /// Fill in the wizard from an answers file and submit it.
    Apply {
        /// TOML file keyed by form control id.
        #[arg(long)]
        answers: PathBuf,

        /// Grant data-verification consent regardless of the answers file.
        #[arg(long)]
        consent: bool,
    },

    /// Print a stored application. Defaults to the last code issued here.
    Show {
        loan_id: Option<String>,
    },

    /// List the available store backends.
    Backends,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    logging::init_default_logging();

    let cli = Cli::parse();

    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let config = AppConfig::load(&cli.config)?.with_overrides(cli.backend, cli.db);
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Quote { amount, term } => {
            println!("{}", app::quote(amount.as_deref(), term.as_deref()));
        }
        Command::Apply { answers, consent } => {
            let answers = Answers::load(&answers)?;
            let repo = app::open_repository(&config.database).await?;
            let orchestrator = app::build_orchestrator(&config, repo);

            let report = app::apply(&orchestrator, &answers, consent).await;
            for line in &report.transcript {
                println!("{line}");
            }
            println!();
            println!("{}", report.outcome);

            if !report.outcome.is_submitted() {
                warn!("application was not submitted");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Show { loan_id } => {
            let repo = app::open_repository(&config.database).await?;
            let local = FileLocalStore::new(config.local_store.path.clone());
            let record = app::show(repo.as_ref(), &local, loan_id.as_deref())
                .await
                .context("Lookup failed")?;
            print!("{record}");
        }
        Command::Backends => {
            for name in app::build_registry().available_backends() {
                println!("{name}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
