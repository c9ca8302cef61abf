//! SyncEngine - boot-time catalog reconciliation
//!
//! Runs once per session. A non-empty persisted snapshot is trusted as is
//! and the backend is never consulted. Otherwise the catalog is rebuilt from
//! backend enumeration: icons are fetched with bounded concurrency, results
//! keep enumeration order, ids run from 1, and the result is persisted.
//!
//! The rebuild is all-or-nothing. If enumeration or any icon fetch fails,
//! nothing is loaded or persisted and the engine stays in `Boot`.
//!
//! A snapshot from a newer build stops the boot and is never overwritten.
//! A snapshot that does not decode is copied aside before the rebuild
//! replaces it.

use std::collections::HashSet;

use futures_util::stream::{self, StreamExt, TryStreamExt};
use log::{info, warn};

use crate::application::ports::BackendGateway;
use crate::application::services::catalog_store::CatalogStore;
use crate::domain::entities::AppItem;
use crate::domain::errors::{GatewayError, PersistenceError, SyncError};
use crate::domain::repositories::KeyValueStore;

/// Default number of icon fetches in flight during a rebuild
pub const DEFAULT_ICON_CONCURRENCY: usize = 4;

/// Reconciliation state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncState {
    /// Catalog not populated yet
    Boot,
    /// Catalog populated; later changes go through the catalog store
    Ready,
}

/// Where the session's catalog came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BootSource {
    /// The persisted snapshot
    Snapshot,
    /// A fresh backend enumeration
    Backend,
}

/// Outcome of a successful boot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BootReport {
    pub source: BootSource,
    pub app_count: usize,
}

/// Boot-time reconciliation state machine
#[derive(Debug)]
pub struct SyncEngine {
    state: SyncState,
    icon_concurrency: usize,
}

impl SyncEngine {
    pub fn new(icon_concurrency: usize) -> Self {
        Self {
            state: SyncState::Boot,
            icon_concurrency: icon_concurrency.max(1),
        }
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Populate `store`, either from its persisted snapshot or the backend
    pub async fn run<S, G>(
        &mut self,
        store: &mut CatalogStore<S>,
        gateway: &G,
    ) -> Result<BootReport, SyncError>
    where
        S: KeyValueStore,
        G: BackendGateway + ?Sized,
    {
        if self.state == SyncState::Ready {
            return Err(SyncError::AlreadyReady);
        }

        let snapshot = match store.persistence().load_catalog() {
            Ok(apps) => apps,
            Err(PersistenceError::UnsupportedVersion { found, supported }) => {
                warn!("Catalog snapshot version {} is newer than {}, not booting", found, supported);
                return Err(SyncError::UnsupportedSnapshot { found, supported });
            }
            Err(PersistenceError::Serialization(e)) => {
                warn!("Ignoring corrupt catalog snapshot: {}", e);
                store.persistence_mut().quarantine_catalog()?;
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        if !snapshot.is_empty() {
            let app_count = snapshot.len();
            store.load(snapshot);
            self.state = SyncState::Ready;
            info!("Catalog restored from snapshot ({} apps)", app_count);
            return Ok(BootReport {
                source: BootSource::Snapshot,
                app_count,
            });
        }

        info!("No catalog snapshot, discovering apps from backend");
        let apps = fetch_catalog(gateway, self.icon_concurrency)
            .await
            .map_err(|e| {
                warn!("Catalog discovery abandoned: {}", e);
                e
            })?;

        let app_count = apps.len();
        store.replace(apps)?;
        self.state = SyncState::Ready;
        info!("Catalog discovered from backend ({} apps)", app_count);
        Ok(BootReport {
            source: BootSource::Backend,
            app_count,
        })
    }
}

impl Default for SyncEngine {
    fn default() -> Self {
        Self::new(DEFAULT_ICON_CONCURRENCY)
    }
}

/// Enumerate the backend and fetch every icon
///
/// At most `concurrency` icon fetches are in flight; the returned apps keep
/// enumeration order and carry ids 1..=n. Only the first app enumerated
/// for a given path is kept. The first failure aborts the whole fetch.
pub async fn fetch_catalog<G>(gateway: &G, concurrency: usize) -> Result<Vec<AppItem>, GatewayError>
where
    G: BackendGateway + ?Sized,
{
    let mut paths = HashSet::new();
    let discovered: Vec<_> = gateway
        .enumerate()
        .await?
        .into_iter()
        .filter(|app| {
            let first = paths.insert(app.path.clone());
            if !first {
                warn!("Skipping '{}': path {} is already listed", app.name, app.path);
            }
            first
        })
        .collect();

    stream::iter(discovered.into_iter().enumerate())
        .map(|(index, app)| async move {
            let icon = gateway.fetch_icon(&app.path).await?;
            Ok::<_, GatewayError>(
                AppItem::new(app.name, app.path)
                    .with_icon(icon)
                    .with_id(index as u64 + 1),
            )
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}
