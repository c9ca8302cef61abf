//! BackendGateway - interface to the authoritative app backend
//!
//! The backend discovers apps, extracts icons, keeps its own registry,
//! launches executables and applies wallpapers. The gateway is a pure
//! pass-through: no caching, no retries. Every failure is an opaque
//! message wrapped in a `GatewayError` naming the operation.
//!
//! Calls are awaited on a single thread, so implementations are not
//! required to be `Send`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::errors::GatewayError;

/// An app as reported by backend enumeration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredApp {
    pub name: String,
    pub path: String,
}

impl DiscoveredApp {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Port interface for the app backend
#[async_trait(?Send)]
pub trait BackendGateway {
    /// List every app the backend knows about, in its own order
    async fn enumerate(&self) -> Result<Vec<DiscoveredApp>, GatewayError>;

    /// Fetch the base64-encoded icon for an executable
    async fn fetch_icon(&self, path: &str) -> Result<String, GatewayError>;

    /// Register a manually added app
    async fn register_app(&self, name: &str, path: &str) -> Result<String, GatewayError>;

    /// Register an app that was dropped onto the launcher
    async fn register_dropped_app(&self, name: &str, path: &str) -> Result<String, GatewayError>;

    /// Start the executable at `path`
    async fn launch(&self, path: &str) -> Result<String, GatewayError>;

    /// Apply an image as the desktop wallpaper
    async fn set_wallpaper(&self, path: &str) -> Result<(), GatewayError>;

    /// Remove the applied wallpaper
    async fn clear_wallpaper(&self) -> Result<(), GatewayError>;
}

/// A null backend for wiring and tests
///
/// Knows no apps and accepts every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBackendGateway;

#[async_trait(?Send)]
impl BackendGateway for NullBackendGateway {
    async fn enumerate(&self) -> Result<Vec<DiscoveredApp>, GatewayError> {
        Ok(Vec::new())
    }

    async fn fetch_icon(&self, _path: &str) -> Result<String, GatewayError> {
        Ok(String::new())
    }

    async fn register_app(&self, name: &str, _path: &str) -> Result<String, GatewayError> {
        Ok(format!("App '{}' added successfully!", name))
    }

    async fn register_dropped_app(&self, name: &str, _path: &str) -> Result<String, GatewayError> {
        Ok(format!("App '{}' added successfully with icon!", name))
    }

    async fn launch(&self, path: &str) -> Result<String, GatewayError> {
        Ok(format!("Launched: {}", path))
    }

    async fn set_wallpaper(&self, _path: &str) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn clear_wallpaper(&self) -> Result<(), GatewayError> {
        Ok(())
    }
}
