use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::factory::{DbConfig, RepositoryFactory};
use super::repository::{ApplicationRepository, RepositoryError};
use crate::models::{ApplicationRecord, LoanId, NewApplication};

/// Process-local repository. Used for demos, dry runs and tests.
///
/// Writes are create-only, like the SQLite backend.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    records: Mutex<BTreeMap<LoanId, ApplicationRecord>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored applications.
    pub fn len(&self) -> usize {
        self.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores a record as-is, bypassing `put`. Handy for seeding collisions.
    pub fn insert_record(
        &self,
        record: ApplicationRecord,
    ) -> Result<(), RepositoryError> {
        self.lock()?.insert(record.loan_id.clone(), record);
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<LoanId, ApplicationRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Database("in-memory store lock poisoned".to_string()))
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryRepository {
    async fn exists(
        &self,
        id: &LoanId,
    ) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.contains_key(id))
    }

    async fn put(
        &self,
        id: &LoanId,
        application: NewApplication,
    ) -> Result<ApplicationRecord, RepositoryError> {
        let mut records = self.lock()?;
        if records.contains_key(id) {
            return Err(RepositoryError::AlreadyExists(id.to_string()));
        }
        let record = ApplicationRecord::new(id.clone(), application, Utc::now());
        records.insert(id.clone(), record.clone());
        Ok(record)
    }

    async fn get(
        &self,
        id: &LoanId,
    ) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Ok(self.lock()?.get(id).cloned())
    }
}

/// [`RepositoryFactory`] for the `"memory"` backend.
///
/// The connection string is ignored; every call yields an empty store.
pub struct InMemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for InMemoryRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &DbConfig,
    ) -> Result<Box<dyn ApplicationRepository>, RepositoryError> {
        Ok(Box::new(InMemoryRepository::new()))
    }
}
