//! AddAppUseCase - Register an application and add it to the catalog
//!
//! The pipeline is the same for both entry points: fetch the icon, have the
//! backend register the app (it may reject it), and only then add it to the
//! catalog. Manual adds come straight from the add dialog; dropped adds
//! arrive here after the user confirmed them at the gate.

use log::{info, warn};

use crate::application::ports::BackendGateway;
use crate::application::services::catalog_store::CatalogStore;
use crate::domain::entities::AppItem;
use crate::domain::errors::{CatalogError, LauncherError};
use crate::domain::repositories::KeyValueStore;

/// How the app reached the launcher
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddSource {
    /// Entered in the add dialog
    Manual,
    /// Dropped onto the launcher
    Dropped,
}

/// A successful add
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddOutcome {
    /// The stored app, id assigned
    pub app: AppItem,
    /// Confirmation message from the backend
    pub message: String,
}

/// Use case for adding applications
pub struct AddAppUseCase<'a, S, G>
where
    S: KeyValueStore,
    G: BackendGateway + ?Sized,
{
    store: &'a mut CatalogStore<S>,
    gateway: &'a G,
    source: AddSource,
}

impl<'a, S, G> AddAppUseCase<'a, S, G>
where
    S: KeyValueStore,
    G: BackendGateway + ?Sized,
{
    /// Create a new add app use case
    pub fn new(store: &'a mut CatalogStore<S>, gateway: &'a G, source: AddSource) -> Self {
        Self {
            store,
            gateway,
            source,
        }
    }

    /// Add the app `name` at `path`
    pub async fn execute(self, name: &str, path: &str) -> Result<AddOutcome, LauncherError> {
        let (name, path) = (name.trim(), path.trim());

        // 1. Refuse a path the catalog already has before bothering the backend
        if self.store.contains_path(path) {
            return Err(CatalogError::DuplicatePath(path.to_string()).into());
        }

        // 2. Icon
        let icon = self.gateway.fetch_icon(path).await.map_err(|e| {
            warn!("Failed to fetch icon for {}: {}", path, e);
            e
        })?;

        // 3. Backend registration
        let registered = match self.source {
            AddSource::Manual => self.gateway.register_app(name, path).await,
            AddSource::Dropped => self.gateway.register_dropped_app(name, path).await,
        };
        let message = registered.map_err(|e| {
            warn!("Backend refused '{}': {}", name, e);
            e
        })?;

        // 4. Catalog
        let app = self
            .store
            .add(AppItem::new(name, path).with_icon(icon))?;
        info!("{:?} add of '{}' complete", self.source, app.name);

        Ok(AddOutcome { app, message })
    }
}
