//! LauncherSession - the one object the shell talks to
//!
//! Owns the catalog store, the confirmation gate, the wallpaper manager and
//! the backend for the lifetime of a session. Every user action goes
//! through here; nothing else mutates the catalog.

use log::info;

use crate::adapters::gateways::PersistenceGateway;
use crate::application::ports::{BackendGateway, ClockPort, SystemClock};
use crate::application::services::catalog_store::CatalogStore;
use crate::application::services::confirmation_gate::ConfirmationGate;
use crate::application::services::sync_engine::{BootReport, SyncEngine, SyncState};
use crate::application::services::wallpaper_manager::{ClearOutcome, WallpaperManager};
use crate::application::use_cases::{AddAppUseCase, AddOutcome, AddSource, LaunchAppUseCase, LaunchOutcome};
use crate::domain::entities::{AppId, AppItem, PendingAction};
use crate::domain::errors::LauncherError;
use crate::domain::repositories::KeyValueStore;
use crate::domain::services::sort_engine;
use crate::domain::value_objects::SortCriterion;

/// What a confirmation did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The pending delete ran; `removed` is false if the app was already gone
    Deleted { app: AppItem, removed: bool },
    /// The pending drop was registered and added
    Added(AddOutcome),
}

/// A launcher session
pub struct LauncherSession<S, G, C = SystemClock>
where
    S: KeyValueStore + Clone,
    G: BackendGateway,
    C: ClockPort,
{
    store: CatalogStore<S>,
    gate: ConfirmationGate,
    wallpaper: WallpaperManager<S>,
    sync: SyncEngine,
    gateway: G,
    clock: C,
}

impl<S, G> LauncherSession<S, G, SystemClock>
where
    S: KeyValueStore + Clone,
    G: BackendGateway,
{
    /// Create a session over `store` and `gateway` using the system clock
    pub fn new(store: S, gateway: G, sync: SyncEngine) -> Self {
        Self::with_clock(store, gateway, sync, SystemClock)
    }
}

impl<S, G, C> LauncherSession<S, G, C>
where
    S: KeyValueStore + Clone,
    G: BackendGateway,
    C: ClockPort,
{
    /// Create a session with an explicit clock
    pub fn with_clock(store: S, gateway: G, sync: SyncEngine, clock: C) -> Self {
        Self {
            store: CatalogStore::new(PersistenceGateway::new(store.clone())),
            gate: ConfirmationGate::new(),
            wallpaper: WallpaperManager::new(PersistenceGateway::new(store)),
            sync,
            gateway,
            clock,
        }
    }

    /// Populate the catalog for this session
    pub async fn boot(&mut self) -> Result<BootReport, LauncherError> {
        let report = self.sync.run(&mut self.store, &self.gateway).await?;
        Ok(report)
    }

    /// Whether boot has completed
    pub fn is_ready(&self) -> bool {
        self.sync.state() == SyncState::Ready
    }

    /// Filtered, ordered view of the catalog
    pub fn view(&self, query: &str, criterion: SortCriterion) -> Vec<&AppItem> {
        sort_engine::view(self.store.apps(), query, criterion)
    }

    /// All apps in catalog order
    pub fn apps(&self) -> &[AppItem] {
        self.store.apps()
    }

    /// Launch the app called `name`
    pub async fn launch(&mut self, name: &str) -> Result<LaunchOutcome, LauncherError> {
        LaunchAppUseCase::new(&mut self.store, &self.gateway, &self.clock)
            .execute(name)
            .await
    }

    /// Add an app from the add dialog (no confirmation step)
    pub async fn add_app(&mut self, name: &str, path: &str) -> Result<AddOutcome, LauncherError> {
        AddAppUseCase::new(&mut self.store, &self.gateway, AddSource::Manual)
            .execute(name, path)
            .await
    }

    /// Ask to delete the app with `id`; returns the replaced pending action
    pub fn request_delete(&mut self, id: AppId) -> Result<Option<PendingAction>, LauncherError> {
        let app = self
            .store
            .get(id)
            .cloned()
            .ok_or(LauncherError::UnknownId(id))?;
        Ok(self.gate.request_delete(app))
    }

    /// A file was dropped onto the launcher; returns the replaced pending action
    pub fn request_drop(&mut self, name: &str, path: &str) -> Option<PendingAction> {
        self.gate.request_add(name, path)
    }

    /// The action awaiting confirmation
    pub fn pending(&self) -> &PendingAction {
        self.gate.pending()
    }

    /// Discard the pending action
    pub fn cancel(&mut self) -> Option<PendingAction> {
        self.gate.cancel()
    }

    /// Carry out the pending action
    ///
    /// The gate is idle afterwards whether or not the action succeeded.
    pub async fn confirm(&mut self) -> Result<Resolution, LauncherError> {
        match self.gate.take() {
            None => Err(LauncherError::NothingPending),
            Some(PendingAction::Delete(app)) => {
                let removed = self.store.remove(app.id)?;
                Ok(Resolution::Deleted { app, removed })
            }
            Some(PendingAction::Add { name, path }) => {
                info!("Confirmed drop of '{}'", name);
                let outcome = AddAppUseCase::new(&mut self.store, &self.gateway, AddSource::Dropped)
                    .execute(&name, &path)
                    .await?;
                Ok(Resolution::Added(outcome))
            }
            Some(PendingAction::None) => Err(LauncherError::NothingPending),
        }
    }

    /// The wallpaper in effect
    pub fn wallpaper(&self) -> Option<&str> {
        self.wallpaper.current()
    }

    /// Apply a wallpaper
    pub async fn set_wallpaper(&mut self, path: &str) -> Result<(), LauncherError> {
        self.wallpaper.set(&self.gateway, path).await
    }

    /// Remove the wallpaper
    pub async fn clear_wallpaper(&mut self) -> Result<ClearOutcome, LauncherError> {
        Ok(self.wallpaper.clear(&self.gateway).await?)
    }

    /// Get the backend gateway
    pub fn gateway(&self) -> &G {
        &self.gateway
    }
}
