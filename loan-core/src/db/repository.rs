use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ApplicationRecord, LoanId, NewApplication};

/// Logical collection every application document is written to.
pub const APPLICATIONS_COLLECTION: &str = "applications";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Record already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RepositoryError {
    /// Short, stable code shown to the user next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound => "not-found",
            Self::AlreadyExists(_) => "already-exists",
            Self::Database(_) => "database",
            Self::Connection(_) => "unavailable",
            Self::Configuration(_) => "configuration",
        }
    }
}

/// Document store holding submitted applications, keyed by [`LoanId`].
///
/// There is deliberately no update or delete: a written application is
/// immutable from the client's point of view.
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Whether a document is already stored under `id`.
    async fn exists(
        &self,
        id: &LoanId,
    ) -> Result<bool, RepositoryError>;

    /// Writes `application` under `id` and returns the stored record with
    /// its store-assigned creation timestamp.
    ///
    /// Backends that can do so refuse to overwrite an existing document
    /// and return [`RepositoryError::AlreadyExists`].
    async fn put(
        &self,
        id: &LoanId,
        application: NewApplication,
    ) -> Result<ApplicationRecord, RepositoryError>;

    async fn get(
        &self,
        id: &LoanId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError>;
}
