use async_trait::async_trait;
use loan_core::db::{DbConfig, RepositoryFactory};
use loan_core::{ApplicationRepository, RepositoryError};

use crate::repository::SqliteRepository;

/// Turns a configured connection string into a sqlx URL.
///
/// * `sqlite:...` URLs are used as-is.
/// * `:memory:` becomes `sqlite::memory:`.
/// * Anything else is a file path, created if missing.
pub fn connection_url(connection_string: &str) -> String {
    let trimmed = connection_string.trim();
    if trimmed.starts_with("sqlite:") {
        trimmed.to_string()
    } else if trimmed == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite:{trimmed}?mode=rwc")
    }
}

/// [`RepositoryFactory`] for SQLite.
///
/// Register this with a [`loan_core::db::RepositoryRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use loan_core::db::RepositoryRegistry;
/// use loan_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::with_builtin_backends();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Opens the database and brings its schema up to date.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn ApplicationRepository>, RepositoryError> {
        let url = connection_url(&config.connection_string);
        let repo = SqliteRepository::new(&url)
            .await
            .map_err(|e| RepositoryError::Connection(format!("{e:#}")))?;
        repo.run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(format!("{e:#}")))?;
        Ok(Box::new(repo))
    }
}
