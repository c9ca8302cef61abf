//! Infrastructure Layer
//!
//! Wires the concrete adapters into the application.

pub mod composition_root;

pub use composition_root::{AppGateway, AppSession, CompositionConfig, CompositionRoot};
