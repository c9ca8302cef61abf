//! FileStore - file-backed key-value store
//!
//! Each key lives in its own file under the data directory. Writes go to a
//! temporary sibling first and are renamed into place, so a crash never
//! leaves a half-written snapshot behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::domain::errors::PersistenceError;
use crate::domain::repositories::KeyValueStore;

/// File-based key-value store
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the data directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the value for `key`
    fn key_path(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(PersistenceError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid store key '{}'", key),
            )));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.key_path(key)?;

        // Ensure data directory exists
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;

        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
