//! TimeoutGateway - bounds every backend call in time
//!
//! A hung backend call would otherwise block the user action that issued
//! it forever. The decorator turns an overrun into `GatewayError::Timeout`
//! and drops the inner future.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;

use crate::application::ports::{BackendGateway, DiscoveredApp};
use crate::domain::errors::GatewayError;

/// Backend decorator applying a per-call timeout
#[derive(Debug)]
pub struct TimeoutGateway<G> {
    inner: G,
    timeout: Duration,
}

impl<G: BackendGateway> TimeoutGateway<G> {
    pub fn new(inner: G, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// Get the wrapped gateway
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Get the configured timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T, F>(&self, operation: &'static str, call: F) -> Result<T, GatewayError>
    where
        F: Future<Output = Result<T, GatewayError>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                let after_ms = self.timeout.as_millis() as u64;
                warn!("Backend call {} timed out after {} ms", operation, after_ms);
                Err(GatewayError::Timeout {
                    operation,
                    after_ms,
                })
            }
        }
    }
}

#[async_trait(?Send)]
impl<G: BackendGateway> BackendGateway for TimeoutGateway<G> {
    async fn enumerate(&self) -> Result<Vec<DiscoveredApp>, GatewayError> {
        self.bounded("enumerate", self.inner.enumerate()).await
    }

    async fn fetch_icon(&self, path: &str) -> Result<String, GatewayError> {
        self.bounded("fetch_icon", self.inner.fetch_icon(path)).await
    }

    async fn register_app(&self, name: &str, path: &str) -> Result<String, GatewayError> {
        self.bounded("register_app", self.inner.register_app(name, path))
            .await
    }

    async fn register_dropped_app(&self, name: &str, path: &str) -> Result<String, GatewayError> {
        self.bounded(
            "register_dropped_app",
            self.inner.register_dropped_app(name, path),
        )
        .await
    }

    async fn launch(&self, path: &str) -> Result<String, GatewayError> {
        self.bounded("launch", self.inner.launch(path)).await
    }

    async fn set_wallpaper(&self, path: &str) -> Result<(), GatewayError> {
        self.bounded("set_wallpaper", self.inner.set_wallpaper(path))
            .await
    }

    async fn clear_wallpaper(&self) -> Result<(), GatewayError> {
        self.bounded("clear_wallpaper", self.inner.clear_wallpaper())
            .await
    }
}
