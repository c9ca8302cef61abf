//! CatalogStore - the session's single source of truth for apps
//!
//! Owns the ordered list of catalog entries. Every successful mutation is
//! written through to persistence as a full snapshot; if that write fails
//! the in-memory change is undone, so memory and disk never disagree.
//!
//! Ids come from a monotonic counter seeded from the loaded catalog, so an
//! id freed by `remove` is never handed out again during the session.

use std::collections::HashSet;

use log::{debug, info, warn};

use crate::adapters::gateways::PersistenceGateway;
use crate::domain::entities::{AppId, AppItem};
use crate::domain::errors::{CatalogError, PersistenceError};
use crate::domain::repositories::KeyValueStore;

/// In-memory catalog with write-through persistence
#[derive(Debug)]
pub struct CatalogStore<S: KeyValueStore> {
    apps: Vec<AppItem>,
    next_id: AppId,
    persistence: PersistenceGateway<S>,
}

impl<S: KeyValueStore> CatalogStore<S> {
    /// Create an empty catalog writing through to `persistence`
    pub fn new(persistence: PersistenceGateway<S>) -> Self {
        Self {
            apps: Vec::new(),
            next_id: 1,
            persistence,
        }
    }

    /// Replace the in-memory catalog wholesale (no persistence write)
    pub fn load(&mut self, initial: Vec<AppItem>) {
        self.next_id = initial.iter().map(|app| app.id).max().unwrap_or(0) + 1;

        let mut ids = HashSet::new();
        if let Some(dup) = initial.iter().find(|app| !ids.insert(app.id)) {
            warn!("Loaded catalog contains duplicate id {} ('{}')", dup.id, dup.name);
        }
        let mut paths = HashSet::new();
        for dup in initial.iter().filter(|app| !paths.insert(app.path.as_str())) {
            warn!("Loaded catalog lists path {} more than once ('{}')", dup.path, dup.name);
        }

        debug!("Catalog loaded with {} apps, next id {}", initial.len(), self.next_id);
        self.apps = initial;
    }

    /// Persist `apps` and, only if that succeeds, load them
    pub fn replace(&mut self, apps: Vec<AppItem>) -> Result<(), PersistenceError> {
        self.persistence.save_catalog(&apps)?;
        self.load(apps);
        Ok(())
    }

    /// Append an app, assigning its id
    ///
    /// Rejects an app whose path is already in the catalog. Names may repeat.
    pub fn add(&mut self, app: AppItem) -> Result<AppItem, CatalogError> {
        if self.contains_path(&app.path) {
            return Err(CatalogError::DuplicatePath(app.path));
        }

        let stored = app.with_id(self.next_id);
        self.apps.push(stored.clone());
        if let Err(e) = self.persist() {
            self.apps.pop();
            return Err(e.into());
        }

        self.next_id += 1;
        info!("Added app '{}' with id {}", stored.name, stored.id);
        Ok(stored)
    }

    /// Remove the app with `id`; returns whether anything was removed
    pub fn remove(&mut self, id: AppId) -> Result<bool, CatalogError> {
        let Some(index) = self.apps.iter().position(|app| app.id == id) else {
            debug!("Remove of unknown id {} ignored", id);
            return Ok(false);
        };

        let removed = self.apps.remove(index);
        if let Err(e) = self.persist() {
            self.apps.insert(index, removed);
            return Err(e.into());
        }

        info!("Removed app '{}' (id {})", removed.name, id);
        Ok(true)
    }

    /// Record a launch of `id` at `timestamp` (epoch millis)
    pub fn touch(&mut self, id: AppId, timestamp: i64) -> Result<Option<AppItem>, CatalogError> {
        let Some(index) = self.apps.iter().position(|app| app.id == id) else {
            return Ok(None);
        };

        let previous = self.apps[index].last_used.replace(timestamp);
        if let Err(e) = self.persist() {
            self.apps[index].last_used = previous;
            return Err(e.into());
        }
        Ok(Some(self.apps[index].clone()))
    }

    /// Find an app by exact name
    ///
    /// Names are not unique; when several entries share the name, the one
    /// with the lowest id wins.
    pub fn find_by_name(&self, name: &str) -> Option<&AppItem> {
        self.apps
            .iter()
            .filter(|app| app.name == name)
            .min_by_key(|app| app.id)
    }

    /// Find an app by id
    pub fn get(&self, id: AppId) -> Option<&AppItem> {
        self.apps.iter().find(|app| app.id == id)
    }

    /// Whether an entry already points at `path`
    pub fn contains_path(&self, path: &str) -> bool {
        self.apps.iter().any(|app| app.path == path)
    }

    /// All apps in catalog order
    pub fn apps(&self) -> &[AppItem] {
        &self.apps
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Id the next added app will receive
    pub fn next_id(&self) -> AppId {
        self.next_id
    }

    /// Get the persistence gateway
    pub fn persistence(&self) -> &PersistenceGateway<S> {
        &self.persistence
    }

    /// Mutable access to the persistence gateway, for boot-time housekeeping
    pub(crate) fn persistence_mut(&mut self) -> &mut PersistenceGateway<S> {
        &mut self.persistence
    }

    fn persist(&mut self) -> Result<(), PersistenceError> {
        self.persistence.save_catalog(&self.apps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::gateways::MemoryStore;

    fn store() -> (CatalogStore<MemoryStore>, MemoryStore) {
        let kv = MemoryStore::new();
        let catalog = CatalogStore::new(PersistenceGateway::new(kv.clone()));
        (catalog, kv)
    }

    fn persisted(kv: &MemoryStore) -> Vec<AppItem> {
        PersistenceGateway::new(kv.clone()).load_catalog().unwrap()
    }

    #[test]
    fn test_add_assigns_ids_and_writes_through() {
        let (mut catalog, kv) = store();

        let zed = catalog.add(AppItem::new("Zed", "/opt/zed")).unwrap();
        let apex = catalog.add(AppItem::new("Apex", "/opt/apex")).unwrap();

        assert_eq!((zed.id, apex.id), (1, 2));
        assert_eq!(persisted(&kv), catalog.apps().to_vec());
        assert_eq!(kv.write_count(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_remove() {
        let (mut catalog, _kv) = store();

        catalog.add(AppItem::new("A", "/a")).unwrap();
        let b = catalog.add(AppItem::new("B", "/b")).unwrap();
        assert!(catalog.remove(b.id).unwrap());

        let c = catalog.add(AppItem::new("C", "/c")).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_load_seeds_counter_from_max_id() {
        let (mut catalog, kv) = store();
        catalog.load(vec![
            AppItem::new("A", "/a").with_id(4),
            AppItem::new("B", "/b").with_id(9),
        ]);

        assert_eq!(catalog.next_id(), 10);
        // Loading alone does not write
        assert_eq!(kv.write_count(), 0);

        catalog.load(Vec::new());
        assert_eq!(catalog.next_id(), 1);
    }

    #[test]
    fn test_load_keeps_entries_sharing_a_path() {
        let (mut catalog, kv) = store();
        catalog.load(vec![
            AppItem::new("Editor", "/opt/ed").with_id(1),
            AppItem::new("Ed", "/opt/ed").with_id(2),
        ]);

        // Only a warning; the stored catalog is not rewritten behind the user's back
        assert_eq!(catalog.len(), 2);
        assert_eq!(kv.write_count(), 0);
        assert!(matches!(
            catalog.add(AppItem::new("Ed 2", "/opt/ed")),
            Err(CatalogError::DuplicatePath(_))
        ));
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let (mut catalog, kv) = store();
        catalog.add(AppItem::new("A", "/a")).unwrap();

        assert!(!catalog.remove(42).unwrap());
        assert_eq!(catalog.len(), 1);
        assert_eq!(kv.write_count(), 1);
    }

    #[test]
    fn test_duplicate_path_is_rejected() {
        let (mut catalog, _kv) = store();
        catalog.add(AppItem::new("A", "/opt/a")).unwrap();

        let err = catalog.add(AppItem::new("Other", "/opt/a")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicatePath(ref p) if p == "/opt/a"));

        // Same name, different path is allowed
        catalog.add(AppItem::new("A", "/opt/a2")).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_find_by_name_prefers_lowest_id() {
        let (mut catalog, _kv) = store();
        catalog.load(vec![
            AppItem::new("Maps", "/second").with_id(5),
            AppItem::new("Maps", "/first").with_id(2),
        ]);

        assert_eq!(catalog.find_by_name("Maps").unwrap().path, "/first");
        assert!(catalog.find_by_name("maps").is_none());
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let (mut catalog, kv) = store();
        let a = catalog.add(AppItem::new("A", "/a")).unwrap();

        kv.set_fail_writes(true);
        assert!(matches!(
            catalog.add(AppItem::new("B", "/b")),
            Err(CatalogError::Persistence(_))
        ));
        assert!(catalog.remove(a.id).is_err());
        assert!(catalog.touch(a.id, 99).is_err());

        assert_eq!(catalog.apps(), &[a.clone()]);
        assert_eq!(catalog.next_id(), 2);

        kv.set_fail_writes(false);
        assert_eq!(catalog.add(AppItem::new("B", "/b")).unwrap().id, 2);
    }

    #[test]
    fn test_touch_records_last_used() {
        let (mut catalog, kv) = store();
        let a = catalog.add(AppItem::new("A", "/a")).unwrap();

        let touched = catalog.touch(a.id, 1_234).unwrap().unwrap();
        assert_eq!(touched.last_used, Some(1_234));
        assert_eq!(persisted(&kv)[0].last_used, Some(1_234));

        assert_eq!(catalog.touch(77, 1).unwrap(), None);
    }

    #[test]
    fn test_replace_persists_before_loading() {
        let (mut catalog, kv) = store();
        let apps = vec![AppItem::new("A", "/a").with_id(1)];

        kv.set_fail_writes(true);
        assert!(catalog.replace(apps.clone()).is_err());
        assert!(catalog.is_empty());

        kv.set_fail_writes(false);
        catalog.replace(apps.clone()).unwrap();
        assert_eq!(catalog.apps(), apps.as_slice());
        assert_eq!(persisted(&kv), apps);
    }
}
