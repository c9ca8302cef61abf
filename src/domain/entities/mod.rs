//! Domain Entities - Core business objects
//!
//! Entities are objects with a distinct identity that persists over time.
//! They represent the core business concepts of the application.

pub mod app_item;
pub mod pending_action;

pub use app_item::{AppId, AppItem};
pub use pending_action::PendingAction;
