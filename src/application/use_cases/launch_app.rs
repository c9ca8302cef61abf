//! LaunchAppUseCase - Launch an application
//!
//! Handles the business logic for launching an application by name and
//! recording when it was last used.

use log::{info, warn};

use crate::application::ports::{BackendGateway, ClockPort};
use crate::application::services::catalog_store::CatalogStore;
use crate::domain::entities::AppItem;
use crate::domain::errors::LauncherError;
use crate::domain::repositories::KeyValueStore;

/// A successful launch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// The launched app, with its updated last-used time
    pub app: AppItem,
    /// Confirmation message from the backend
    pub message: String,
}

/// Use case for launching applications
pub struct LaunchAppUseCase<'a, S, G, C>
where
    S: KeyValueStore,
    G: BackendGateway + ?Sized,
    C: ClockPort + ?Sized,
{
    store: &'a mut CatalogStore<S>,
    gateway: &'a G,
    clock: &'a C,
}

impl<'a, S, G, C> LaunchAppUseCase<'a, S, G, C>
where
    S: KeyValueStore,
    G: BackendGateway + ?Sized,
    C: ClockPort + ?Sized,
{
    /// Create a new launch app use case
    pub fn new(store: &'a mut CatalogStore<S>, gateway: &'a G, clock: &'a C) -> Self {
        Self {
            store,
            gateway,
            clock,
        }
    }

    /// Launch the app called `name`
    ///
    /// An unknown name fails locally without a backend round-trip. A failed
    /// recency write does not turn a successful launch into an error.
    pub async fn execute(self, name: &str) -> Result<LaunchOutcome, LauncherError> {
        // 1. Find the application
        let app = self
            .store
            .find_by_name(name)
            .cloned()
            .ok_or_else(|| LauncherError::NotFound(name.to_string()))?;

        // 2. Launch it
        let message = self.gateway.launch(&app.path).await.map_err(|e| {
            warn!("Failed to launch '{}': {}", app.name, e);
            e
        })?;
        info!("Launched app '{}' ({})", app.name, app.path);

        // 3. Record recency
        let app = match self.store.touch(app.id, self.clock.now_millis()) {
            Ok(Some(updated)) => updated,
            Ok(None) => app,
            Err(e) => {
                warn!("Could not record launch of '{}': {}", app.name, e);
                app
            }
        };

        Ok(LaunchOutcome { app, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::gateways::{MemoryBackend, MemoryStore, PersistenceGateway};
    use crate::application::ports::FixedClock;

    fn catalog(kv: &MemoryStore) -> CatalogStore<MemoryStore> {
        let mut store = CatalogStore::new(PersistenceGateway::new(kv.clone()));
        store.load(vec![
            AppItem::new("Maps", "/opt/maps").with_id(1),
            AppItem::new("Apex", "/opt/apex").with_id(2),
        ]);
        store
    }

    #[tokio::test]
    async fn test_launch_records_last_used() {
        let kv = MemoryStore::new();
        let mut store = catalog(&kv);
        let backend = MemoryBackend::new();
        let clock = FixedClock::new(1_700_000_000_000);

        let outcome = LaunchAppUseCase::new(&mut store, &backend, &clock)
            .execute("Apex")
            .await
            .unwrap();

        assert_eq!(outcome.message, "Launched: /opt/apex");
        assert_eq!(outcome.app.last_used, Some(1_700_000_000_000));
        assert_eq!(backend.calls(), vec![("launch", "/opt/apex".to_string())]);

        let persisted = PersistenceGateway::new(kv.clone()).load_catalog().unwrap();
        assert_eq!(persisted[1].last_used, Some(1_700_000_000_000));
        assert_eq!(persisted[0].last_used, None);
    }

    #[tokio::test]
    async fn test_unknown_name_skips_backend() {
        let kv = MemoryStore::new();
        let mut store = catalog(&kv);
        let backend = MemoryBackend::new();
        let clock = FixedClock::new(0);

        let err = LaunchAppUseCase::new(&mut store, &backend, &clock)
            .execute("Paper")
            .await
            .unwrap_err();

        assert!(matches!(err, LauncherError::NotFound(ref n) if n == "Paper"));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_launch_leaves_recency_alone() {
        let kv = MemoryStore::new();
        let mut store = catalog(&kv);
        let backend = MemoryBackend::new().failing_launch("/opt/maps");
        let clock = FixedClock::new(5);

        let err = LaunchAppUseCase::new(&mut store, &backend, &clock)
            .execute("Maps")
            .await
            .unwrap_err();

        assert!(matches!(err, LauncherError::Gateway(_)));
        assert_eq!(store.get(1).unwrap().last_used, None);
        assert_eq!(kv.write_count(), 0);
    }

    #[tokio::test]
    async fn test_recency_write_failure_still_launches() {
        let kv = MemoryStore::new();
        let mut store = catalog(&kv);
        let backend = MemoryBackend::new();
        let clock = FixedClock::new(5);
        kv.set_fail_writes(true);

        let outcome = LaunchAppUseCase::new(&mut store, &backend, &clock)
            .execute("Maps")
            .await
            .unwrap();

        assert_eq!(outcome.app.last_used, None);
        assert_eq!(backend.call_count("launch"), 1);
    }
}
