//! AppDeck library - application catalog engine for a launcher shell
//!
//! The binary in main.rs is a thin command-line shell; everything it does
//! goes through `LauncherSession`, built by the composition root.

// Entities, value objects and pure services
pub mod domain;

// Use cases, ports and session state
pub mod application;

// Stores, backends and presenters
pub mod adapters;

// Dependency wiring
pub mod infrastructure;

// Config and logging
pub mod shared;

pub use application::services::{LauncherSession, Resolution};
pub use domain::entities::{AppId, AppItem, PendingAction};
pub use domain::errors::LauncherError;
pub use domain::value_objects::SortCriterion;
pub use infrastructure::CompositionRoot;
pub use shared::Config;
