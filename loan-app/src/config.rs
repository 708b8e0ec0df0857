//! `loan-wizard.toml` configuration.
//!
//! ```toml
//! [database]
//! backend = "sqlite"
//! connection_string = "applications.db"
//!
//! [submission]
//! min_overlay_ms = 4500
//!
//! [contact]
//! whatsapp_number = "573244674918"
//! support_email = "support@instant-prestamos.online"
//!
//! [local_store]
//! path = "loan-wizard-state.toml"
//! ```
//!
//! Every section and key is optional.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use loan_core::DbConfig;
use loan_core::links::ContactConfig;
use loan_core::submission::{DEFAULT_MIN_OVERLAY_MS, SubmissionConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "loan-wizard.toml";
pub const DEFAULT_DATABASE_PATH: &str = "applications.db";
pub const DEFAULT_LOCAL_STORE_PATH: &str = "loan-wizard-state.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DbConfig,
    pub submission: SubmissionSettings,
    pub contact: ContactConfig,
    pub local_store: LocalStoreSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DbConfig {
                backend: "sqlite".to_string(),
                connection_string: DEFAULT_DATABASE_PATH.to_string(),
            },
            submission: SubmissionSettings::default(),
            contact: ContactConfig::default(),
            local_store: LocalStoreSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionSettings {
    pub min_overlay_ms: u64,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            min_overlay_ms: DEFAULT_MIN_OVERLAY_MS,
        }
    }
}

impl SubmissionSettings {
    pub fn to_config(&self) -> SubmissionConfig {
        SubmissionConfig {
            min_overlay: Duration::from_millis(self.min_overlay_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalStoreSettings {
    pub path: PathBuf,
}

impl Default for LocalStoreSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOCAL_STORE_PATH),
        }
    }
}

impl AppConfig {
    /// Parses a configuration document.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Applies command-line overrides on top of the file values.
    pub fn with_overrides(
        mut self,
        backend: Option<String>,
        db: Option<String>,
    ) -> Self {
        if let Some(backend) = backend {
            self.database.backend = backend;
        }
        if let Some(db) = db {
            self.database.connection_string = db;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [database]
            backend = "memory"

            [submission]
            min_overlay_ms = 0

            [contact]
            support_email = "ayuda@example.cr"
            "#,
        )
        .unwrap();

        assert_eq!(config.database.backend, "memory");
        assert_eq!(config.database.connection_string, "sqlite::memory:");
        assert_eq!(config.submission.to_config().min_overlay, Duration::ZERO);
        assert_eq!(config.contact.support_email, "ayuda@example.cr");
        assert_eq!(config.contact.whatsapp_number, loan_core::links::DEFAULT_WHATSAPP_NUMBER);
        assert_eq!(config.local_store.path, PathBuf::from(DEFAULT_LOCAL_STORE_PATH));
    }

    #[test]
    fn default_overlay_matches_core() {
        assert_eq!(
            AppConfig::default().submission.to_config(),
            SubmissionConfig::default()
        );
    }

    #[test]
    fn overrides_replace_database_settings() {
        let config = AppConfig::default().with_overrides(Some("memory".into()), None);
        assert_eq!(config.database.backend, "memory");
        assert_eq!(config.database.connection_string, DEFAULT_DATABASE_PATH);

        let config = AppConfig::default().with_overrides(None, Some(":memory:".into()));
        assert_eq!(config.database.backend, "sqlite");
        assert_eq!(config.database.connection_string, ":memory:");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("loan-wizard-config-that-does-not-exist.toml");
        assert_eq!(AppConfig::load(&path).unwrap(), AppConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(AppConfig::from_toml_str("[database\nbackend = 1").is_err());
    }
}
