//! Adapters Layer
//!
//! Concrete implementations of the application ports (gateways) and the
//! formatting of application state for the shell (presenters).

pub mod gateways;
pub mod presenters;
