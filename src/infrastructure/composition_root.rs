//! CompositionRoot - Dependency Injection Container
//!
//! This module wires together all the dependencies for the application.
//! It creates and owns the launcher session and its presenter.

use std::path::PathBuf;
use std::time::Duration;

use log::debug;

use crate::adapters::gateways::{FileStore, LocalBackend, TimeoutGateway};
use crate::adapters::presenters::CatalogPresenter;
use crate::application::services::sync_engine::DEFAULT_ICON_CONCURRENCY;
use crate::application::services::{LauncherSession, SyncEngine};
use crate::domain::value_objects::SortCriterion;
use crate::shared::config::Config;

/// Backend as seen by the session
pub type AppGateway = TimeoutGateway<LocalBackend>;

/// Session over the on-disk store and the local backend
pub type AppSession = LauncherSession<FileStore, AppGateway>;

/// Application composition root - owns all dependencies
pub struct CompositionRoot {
    pub session: AppSession,
    pub presenter: CatalogPresenter,
    pub default_sort: SortCriterion,
    data_dir: PathBuf,
}

impl CompositionRoot {
    /// Create from the loaded application config
    pub fn new(config: &Config) -> Self {
        Self::with_config(CompositionConfig::from(config))
    }

    /// Create with custom configuration
    pub fn with_config(config: CompositionConfig) -> Self {
        debug!("Composing session over {:?}", config.data_dir);

        // Create gateways
        let store = FileStore::new(config.data_dir.clone());
        let backend = LocalBackend::with_registry(config.registry_path, &config.data_dir);
        let gateway = TimeoutGateway::new(backend, config.gateway_timeout);

        // Create application services
        let sync = SyncEngine::new(config.icon_fetch_concurrency);
        let session = LauncherSession::new(store, gateway, sync);

        Self {
            session,
            presenter: CatalogPresenter::new(),
            default_sort: config.default_sort,
            data_dir: config.data_dir,
        }
    }

    /// Directory holding all persisted state
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }
}

/// Configuration for the composition root
#[derive(Clone, Debug)]
pub struct CompositionConfig {
    /// Directory for the catalog snapshot and wallpaper
    pub data_dir: PathBuf,
    /// Backend registry file
    pub registry_path: PathBuf,
    /// Upper bound for a single backend call
    pub gateway_timeout: Duration,
    /// Icon fetches in flight during boot
    pub icon_fetch_concurrency: usize,
    /// Ordering when none is requested
    pub default_sort: SortCriterion,
}

impl CompositionConfig {
    /// Config rooted at `data_dir` with everything else defaulted
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            registry_path: data_dir.join("apps.txt"),
            data_dir,
            gateway_timeout: Duration::from_millis(30_000),
            icon_fetch_concurrency: DEFAULT_ICON_CONCURRENCY,
            default_sort: SortCriterion::default(),
        }
    }
}

impl From<&Config> for CompositionConfig {
    fn from(config: &Config) -> Self {
        Self {
            data_dir: config.data_dir(),
            registry_path: config.registry_path(),
            gateway_timeout: config.gateway_timeout(),
            icon_fetch_concurrency: config.icon_fetch_concurrency,
            default_sort: config.default_sort,
        }
    }
}
