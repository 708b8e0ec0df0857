use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use loan_core::db::APPLICATIONS_COLLECTION;
use loan_core::{ApplicationRecord, ApplicationRepository, LoanId, NewApplication, RepositoryError};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use tracing::debug;

/// Application store on SQLite.
///
/// Documents live in a generic `documents` table keyed by
/// `(collection, doc_id)`, with the application serialized as JSON.
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Connects to `database_url` (a sqlx URL such as
    /// `sqlite:applications.db?mode=rwc` or `sqlite::memory:`).
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = if is_memory_url(database_url) {
            // Every connection to `:memory:` is a separate database.
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };
        let pool = options
            .connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            RepositoryError::Connection(err.to_string())
        }
        other => RepositoryError::Database(other.to_string()),
    }
}

fn row_to_record(row: &SqliteRow) -> Result<ApplicationRecord, RepositoryError> {
    let doc_id: String = row
        .try_get("doc_id")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
    let body: String = row
        .try_get("body")
        .map_err(|e| RepositoryError::Database(e.to_string()))?;
    let created_at = row
        .try_get::<DateTime<Utc>, _>("created_at")
        .map_err(|e| RepositoryError::Database(format!("Failed to get created_at: {}", e)))?;

    let loan_id = LoanId::parse(&doc_id)
        .map_err(|e| RepositoryError::Database(format!("Stored id '{doc_id}' is invalid: {e}")))?;
    let application: NewApplication = serde_json::from_str(&body)
        .map_err(|e| RepositoryError::Database(format!("Stored document '{doc_id}' is corrupt: {e}")))?;

    Ok(ApplicationRecord::new(loan_id, application, created_at))
}

#[async_trait]
impl ApplicationRepository for SqliteRepository {
    async fn exists(
        &self,
        id: &LoanId,
    ) -> Result<bool, RepositoryError> {
        let row = sqlx::query("SELECT 1 FROM documents WHERE collection = ? AND doc_id = ?")
            .bind(APPLICATIONS_COLLECTION)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(row.is_some())
    }

    async fn put(
        &self,
        id: &LoanId,
        application: NewApplication,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let now = Utc::now().trunc_subsecs(6);
        let body = serde_json::to_string(&application)
            .map_err(|e| RepositoryError::Database(format!("Failed to encode application: {}", e)))?;

        let result = sqlx::query(
            "INSERT INTO documents (collection, doc_id, body, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(APPLICATIONS_COLLECTION)
        .bind(id.as_str())
        .bind(&body)
        .bind(now)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {}
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(RepositoryError::AlreadyExists(id.to_string()));
            }
            Err(e) => return Err(map_sqlx_error(e)),
        }

        debug!(%id, bytes = body.len(), "stored application document");
        Ok(ApplicationRecord::new(id.clone(), application, now))
    }

    async fn get(
        &self,
        id: &LoanId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let row = sqlx::query(
            "SELECT doc_id, body, created_at
             FROM documents WHERE collection = ? AND doc_id = ?",
        )
        .bind(APPLICATIONS_COLLECTION)
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_record).transpose()
    }
}
