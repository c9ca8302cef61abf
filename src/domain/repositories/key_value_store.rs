//! KeyValueStore - interface for durable string-keyed storage
//!
//! The persistence layer stores each piece of state (catalog snapshot,
//! wallpaper reference) under its own key. Implementations are cheap
//! handles: cloning one yields another handle onto the same storage.

use crate::domain::errors::PersistenceError;

/// Repository interface for durable key-value storage
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Delete `key`; deleting an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

/// A null implementation for testing
///
/// Reads find nothing and writes are discarded.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullKeyValueStore;

impl KeyValueStore for NullKeyValueStore {
    fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
        Ok(())
    }

    fn remove(&mut self, _key: &str) -> Result<(), PersistenceError> {
        Ok(())
    }
}
