//! Application Services - Coordination and state management
//!
//! These services own the session's mutable state and coordinate the use
//! cases that act on it.

pub mod catalog_store;
pub mod confirmation_gate;
pub mod session;
pub mod sync_engine;
pub mod wallpaper_manager;

pub use catalog_store::CatalogStore;
pub use confirmation_gate::ConfirmationGate;
pub use session::{LauncherSession, Resolution};
pub use sync_engine::{BootReport, BootSource, SyncEngine, SyncState};
pub use wallpaper_manager::{ClearOutcome, WallpaperManager};
