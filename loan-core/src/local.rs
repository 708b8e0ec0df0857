//! Device-local key/value storage.
//!
//! Used to remember the last issued application code on the applicant's
//! device. Writes are best effort: callers log and ignore failures.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

/// Key under which the last issued loan id is remembered.
pub const LAST_LOAN_ID_KEY: &str = "instant_loan_id";

#[derive(Debug, Error)]
pub enum LocalStoreError {
    #[error("local storage unavailable: {0}")]
    Unavailable(String),

    #[error("local storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("local storage is corrupt: {0}")]
    Corrupt(String),
}

pub trait LocalStore: Send + Sync {
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), LocalStoreError>;

    fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, LocalStoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryLocalStore {
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), LocalStoreError> {
        self.values
            .lock()
            .map_err(|_| LocalStoreError::Unavailable("lock poisoned".to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, LocalStoreError> {
        Ok(self
            .values
            .lock()
            .map_err(|_| LocalStoreError::Unavailable("lock poisoned".to_string()))?
            .get(key)
            .cloned())
    }
}
