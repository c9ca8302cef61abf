//! Domain Layer - Core business concepts
//!
//! Contains entities, value objects, pure services and repository
//! interfaces. Has no knowledge of the backend, the filesystem or the
//! runtime.

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use errors::{CatalogError, GatewayError, LauncherError, PersistenceError, SyncError};
