//! PersistenceGateway - catalog snapshot and wallpaper storage
//!
//! Layout in the key-value store:
//! - `apps`: `{"version": 1, "apps": [AppItem, ...]}`; a bare JSON array
//!   (written before snapshots carried a version) is read as version 1
//! - `apps_corrupt`: the last snapshot that failed to decode, kept verbatim
//! - `wallpaper`: the wallpaper path as plain text, absent when unset

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::domain::entities::AppItem;
use crate::domain::errors::PersistenceError;
use crate::domain::repositories::KeyValueStore;

/// Store key for the catalog snapshot
pub const APPS_KEY: &str = "apps";
/// Store key holding a snapshot set aside because it could not be decoded
pub const QUARANTINE_KEY: &str = "apps_corrupt";
/// Store key for the wallpaper reference
pub const WALLPAPER_KEY: &str = "wallpaper";
/// Newest snapshot layout this build reads and the one it writes
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    apps: &'a [AppItem],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotIn {
    Versioned { version: u32, apps: Vec<AppItem> },
    Unversioned(Vec<AppItem>),
}

/// Encode a catalog snapshot
pub fn encode_snapshot(apps: &[AppItem]) -> Result<String, PersistenceError> {
    let snapshot = SnapshotOut {
        version: SNAPSHOT_VERSION,
        apps,
    };
    Ok(serde_json::to_string(&snapshot)?)
}

/// Decode a catalog snapshot, preserving element order
pub fn decode_snapshot(content: &str) -> Result<Vec<AppItem>, PersistenceError> {
    match serde_json::from_str::<SnapshotIn>(content)? {
        SnapshotIn::Versioned { version, .. } if version > SNAPSHOT_VERSION => {
            Err(PersistenceError::UnsupportedVersion {
                found: version,
                supported: SNAPSHOT_VERSION,
            })
        }
        SnapshotIn::Versioned { apps, .. } => Ok(apps),
        SnapshotIn::Unversioned(apps) => Ok(apps),
    }
}

/// Persistence adapter over a key-value store
#[derive(Clone, Debug)]
pub struct PersistenceGateway<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the stored catalog; an absent snapshot is an empty catalog
    pub fn load_catalog(&self) -> Result<Vec<AppItem>, PersistenceError> {
        match self.store.get(APPS_KEY)? {
            Some(content) => decode_snapshot(&content),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the stored catalog with `apps`
    pub fn save_catalog(&mut self, apps: &[AppItem]) -> Result<(), PersistenceError> {
        let content = encode_snapshot(apps)?;
        self.store.set(APPS_KEY, &content)?;
        debug!("Persisted catalog snapshot with {} apps", apps.len());
        Ok(())
    }

    /// Copy the raw catalog snapshot aside under `QUARANTINE_KEY`
    ///
    /// Called before an undecodable snapshot gets overwritten.
    pub fn quarantine_catalog(&mut self) -> Result<(), PersistenceError> {
        if let Some(content) = self.store.get(APPS_KEY)? {
            self.store.set(QUARANTINE_KEY, &content)?;
            warn!("Set aside undecodable catalog snapshot under '{}'", QUARANTINE_KEY);
        }
        Ok(())
    }

    /// Load the stored wallpaper path
    pub fn load_wallpaper(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self
            .store
            .get(WALLPAPER_KEY)?
            .filter(|path| !path.trim().is_empty()))
    }

    /// Store or clear the wallpaper path
    pub fn save_wallpaper(&mut self, path: Option<&str>) -> Result<(), PersistenceError> {
        match path {
            Some(path) => self.store.set(WALLPAPER_KEY, path),
            None => self.store.remove(WALLPAPER_KEY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::gateways::MemoryStore;
    use crate::domain::repositories::NullKeyValueStore;

    fn sample_catalog() -> Vec<AppItem> {
        vec![
            AppItem::new("Zed", "/opt/zed").with_id(1).with_icon("WkVE"),
            AppItem::new("apex", "/opt/apex")
                .with_id(2)
                .with_last_used(1_700_000_000_000),
            AppItem::new("Maps", "C:\\Program Files\\Maps\\maps.exe").with_id(7),
        ]
    }

    #[test]
    fn test_snapshot_round_trip_keeps_order() {
        let apps = sample_catalog();
        let encoded = encode_snapshot(&apps).unwrap();
        assert_eq!(decode_snapshot(&encoded).unwrap(), apps);
    }

    #[test]
    fn test_snapshot_is_versioned() {
        let encoded = encode_snapshot(&[]).unwrap();
        assert_eq!(encoded, r#"{"version":1,"apps":[]}"#);
    }

    #[test]
    fn test_reads_unversioned_array() {
        let content = r#"[{"id":1,"name":"Maps","icon":"","path":"/usr/bin/maps","lastUsed":5}]"#;
        let apps = decode_snapshot(content).unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].last_used, Some(5));
    }

    #[test]
    fn test_rejects_newer_version() {
        let content = r#"{"version":2,"apps":[]}"#;
        assert!(matches!(
            decode_snapshot(content),
            Err(PersistenceError::UnsupportedVersion { found: 2, supported: 1 })
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            decode_snapshot("not json"),
            Err(PersistenceError::Serialization(_))
        ));
    }

    #[test]
    fn test_quarantine_keeps_raw_snapshot() {
        let mut store = MemoryStore::new();
        store.set(APPS_KEY, "{ not json").unwrap();
        let mut gateway = PersistenceGateway::new(store.clone());

        gateway.quarantine_catalog().unwrap();

        assert_eq!(store.get(QUARANTINE_KEY).unwrap().as_deref(), Some("{ not json"));
        assert_eq!(store.get(APPS_KEY).unwrap().as_deref(), Some("{ not json"));
    }

    #[test]
    fn test_quarantine_without_snapshot_writes_nothing() {
        let store = MemoryStore::new();
        PersistenceGateway::new(store.clone()).quarantine_catalog().unwrap();
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_null_store_discards_writes() {
        let mut gateway = PersistenceGateway::new(NullKeyValueStore);

        gateway.save_catalog(&sample_catalog()).unwrap();
        gateway.save_wallpaper(Some("/images/sea.png")).unwrap();

        assert!(gateway.load_catalog().unwrap().is_empty());
        assert_eq!(gateway.load_wallpaper().unwrap(), None);
    }

    #[test]
    fn test_catalog_and_wallpaper_keys_are_independent() {
        let store = MemoryStore::new();
        let mut gateway = PersistenceGateway::new(store.clone());

        assert!(gateway.load_catalog().unwrap().is_empty());
        assert_eq!(gateway.load_wallpaper().unwrap(), None);

        gateway.save_catalog(&sample_catalog()).unwrap();
        gateway.save_wallpaper(Some("/images/sea.png")).unwrap();
        assert_eq!(gateway.load_catalog().unwrap(), sample_catalog());
        assert_eq!(
            gateway.load_wallpaper().unwrap().as_deref(),
            Some("/images/sea.png")
        );

        gateway.save_wallpaper(None).unwrap();
        assert_eq!(gateway.load_wallpaper().unwrap(), None);
        assert!(store.contains(APPS_KEY));
    }
}
