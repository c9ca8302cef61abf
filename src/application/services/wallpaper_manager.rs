//! WallpaperManager - the optional wallpaper reference
//!
//! Independent of the catalog. Setting applies the image through the
//! backend first and only then persists the path. Clearing always drops the
//! local reference, even when the backend could not clear its side.

use log::{info, warn};

use crate::adapters::gateways::PersistenceGateway;
use crate::application::ports::BackendGateway;
use crate::domain::errors::{GatewayError, LauncherError, PersistenceError};
use crate::domain::repositories::KeyValueStore;

/// Result of a clear
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ClearOutcome {
    /// Set when the backend failed to clear; the local reference is gone anyway
    pub backend_error: Option<GatewayError>,
}

/// Wallpaper reference with persistence
#[derive(Debug)]
pub struct WallpaperManager<S: KeyValueStore> {
    persistence: PersistenceGateway<S>,
    current: Option<String>,
}

impl<S: KeyValueStore> WallpaperManager<S> {
    /// Create a manager, restoring any persisted reference
    pub fn new(persistence: PersistenceGateway<S>) -> Self {
        let current = persistence.load_wallpaper().unwrap_or_else(|e| {
            warn!("Ignoring unreadable wallpaper reference: {}", e);
            None
        });
        Self {
            persistence,
            current,
        }
    }

    /// The wallpaper path currently in effect
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Apply and remember `path`
    pub async fn set<G>(&mut self, gateway: &G, path: &str) -> Result<(), LauncherError>
    where
        G: BackendGateway + ?Sized,
    {
        gateway.set_wallpaper(path).await?;
        self.persistence.save_wallpaper(Some(path))?;
        self.current = Some(path.to_string());
        info!("Wallpaper set to {}", path);
        Ok(())
    }

    /// Remove the wallpaper
    pub async fn clear<G>(&mut self, gateway: &G) -> Result<ClearOutcome, PersistenceError>
    where
        G: BackendGateway + ?Sized,
    {
        let backend_error = gateway.clear_wallpaper().await.err();
        if let Some(e) = &backend_error {
            warn!("Backend could not clear wallpaper, clearing locally: {}", e);
        }

        self.persistence.save_wallpaper(None)?;
        self.current = None;
        Ok(ClearOutcome { backend_error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::gateways::{MemoryBackend, MemoryStore};

    fn manager(kv: &MemoryStore) -> WallpaperManager<MemoryStore> {
        WallpaperManager::new(PersistenceGateway::new(kv.clone()))
    }

    #[tokio::test]
    async fn test_set_persists_after_backend_accepts() {
        let kv = MemoryStore::new();
        let backend = MemoryBackend::new();
        let mut wallpaper = manager(&kv);

        wallpaper.set(&backend, "/images/sea.png").await.unwrap();
        assert_eq!(wallpaper.current(), Some("/images/sea.png"));
        assert_eq!(backend.wallpaper().as_deref(), Some("/images/sea.png"));

        // A new manager restores the reference
        assert_eq!(manager(&kv).current(), Some("/images/sea.png"));
    }

    #[tokio::test]
    async fn test_rejected_set_keeps_previous() {
        let kv = MemoryStore::new();
        let mut wallpaper = manager(&kv);
        wallpaper
            .set(&MemoryBackend::new(), "/images/sea.png")
            .await
            .unwrap();

        let failing = MemoryBackend::new().failing_wallpaper();
        let err = wallpaper.set(&failing, "/images/bad.tiff").await.unwrap_err();

        assert!(matches!(err, LauncherError::Gateway(_)));
        assert_eq!(wallpaper.current(), Some("/images/sea.png"));
        assert_eq!(manager(&kv).current(), Some("/images/sea.png"));
    }

    #[tokio::test]
    async fn test_clear_succeeds_locally_when_backend_fails() {
        let kv = MemoryStore::new();
        let mut wallpaper = manager(&kv);
        wallpaper
            .set(&MemoryBackend::new(), "/images/sea.png")
            .await
            .unwrap();

        let failing = MemoryBackend::new().failing_wallpaper();
        let outcome = wallpaper.clear(&failing).await.unwrap();

        assert!(outcome.backend_error.is_some());
        assert_eq!(wallpaper.current(), None);
        assert_eq!(manager(&kv).current(), None);
    }

    #[tokio::test]
    async fn test_clear_without_wallpaper() {
        let kv = MemoryStore::new();
        let mut wallpaper = manager(&kv);

        let outcome = wallpaper.clear(&MemoryBackend::new()).await.unwrap();
        assert_eq!(outcome, ClearOutcome::default());
    }
}
