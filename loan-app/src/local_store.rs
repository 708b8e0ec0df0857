use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use loan_core::local::{LocalStore, LocalStoreError};
use tracing::debug;

/// [`LocalStore`] persisted as a flat TOML table of strings.
///
/// The whole file is rewritten on every `set`.
#[derive(Debug)]
pub struct FileLocalStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileLocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, LocalStoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        toml::from_str(&text)
            .map_err(|e| LocalStoreError::Corrupt(format!("{}: {e}", self.path.display())))
    }
}

impl LocalStore for FileLocalStore {
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), LocalStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        let text = toml::to_string(&values)
            .map_err(|e| LocalStoreError::Unavailable(e.to_string()))?;
        std::fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), key, "local value stored");
        Ok(())
    }

    fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, LocalStoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.read_all()?.remove(key))
    }
}
