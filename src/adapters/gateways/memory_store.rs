//! MemoryStore - in-memory key-value store
//!
//! Clones share the same map, so a test can keep one handle to inspect
//! what the catalog wrote through another.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

use crate::domain::errors::PersistenceError;
use crate::domain::repositories::KeyValueStore;

/// In-memory key-value store
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes and removals so far
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Whether `key` currently holds a value
    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    fn check_writable(&self) -> Result<(), PersistenceError> {
        if self.fail_writes.get() {
            return Err(PersistenceError::Io(io::Error::new(
                io::ErrorKind::Other,
                "store is read-only",
            )));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.check_writable()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.check_writable()?;
        self.entries.borrow_mut().remove(key);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_entries() {
        let mut store = MemoryStore::new();
        let observer = store.clone();

        store.set("apps", "[]").unwrap();
        assert!(observer.contains("apps"));
        assert_eq!(observer.write_count(), 1);
    }

    #[test]
    fn test_failing_writes_leave_entries_alone() {
        let mut store = MemoryStore::new();
        store.set("wallpaper", "/a.png").unwrap();

        store.set_fail_writes(true);
        assert!(store.set("wallpaper", "/b.png").is_err());
        assert!(store.remove("wallpaper").is_err());
        assert_eq!(store.get("wallpaper").unwrap().as_deref(), Some("/a.png"));
    }
}
