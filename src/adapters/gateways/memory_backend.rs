//! MemoryBackend - scriptable in-memory app backend
//!
//! Behaves like `LocalBackend` (registry order, duplicate-name rejection)
//! without touching the filesystem. Failures and latency can be scripted
//! per operation, and every call is recorded so callers can assert on
//! what reached the backend.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::application::ports::{BackendGateway, DiscoveredApp};
use crate::domain::errors::GatewayError;

/// In-memory backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    registry: RefCell<Vec<DiscoveredApp>>,
    icons: HashMap<String, String>,
    failing_icons: HashSet<String>,
    rejected_paths: HashSet<String>,
    failing_launches: HashSet<String>,
    fail_enumerate: bool,
    fail_wallpaper: bool,
    delay: Option<Duration>,
    path_delays: HashMap<String, Duration>,
    icons_in_flight: Cell<usize>,
    peak_icons_in_flight: Cell<usize>,
    wallpaper: RefCell<Option<String>>,
    calls: RefCell<Vec<(&'static str, String)>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: pre-register an app
    pub fn with_app(self, name: &str, path: &str) -> Self {
        self.registry
            .borrow_mut()
            .push(DiscoveredApp::new(name, path));
        self
    }

    /// Builder: serve a specific icon payload for `path`
    pub fn with_icon(mut self, path: &str, icon: &str) -> Self {
        self.icons.insert(path.to_string(), icon.to_string());
        self
    }

    /// Builder: make icon fetches for `path` fail
    pub fn failing_icon(mut self, path: &str) -> Self {
        self.failing_icons.insert(path.to_string());
        self
    }

    /// Builder: make registration of `path` fail
    pub fn rejecting_path(mut self, path: &str) -> Self {
        self.rejected_paths.insert(path.to_string());
        self
    }

    /// Builder: make launching `path` fail
    pub fn failing_launch(mut self, path: &str) -> Self {
        self.failing_launches.insert(path.to_string());
        self
    }

    /// Builder: make enumeration fail
    pub fn failing_enumerate(mut self) -> Self {
        self.fail_enumerate = true;
        self
    }

    /// Builder: make wallpaper operations fail
    pub fn failing_wallpaper(mut self) -> Self {
        self.fail_wallpaper = true;
        self
    }

    /// Builder: delay every call by `delay`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Builder: delay calls whose argument is `path` by `delay`
    ///
    /// Takes precedence over `with_delay`.
    pub fn with_path_delay(mut self, path: &str, delay: Duration) -> Self {
        self.path_delays.insert(path.to_string(), delay);
        self
    }

    /// Most icon fetches that were ever running at the same time
    pub fn peak_icons_in_flight(&self) -> usize {
        self.peak_icons_in_flight.get()
    }

    /// Number of calls made to `operation`
    pub fn call_count(&self, operation: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|(op, _)| *op == operation)
            .count()
    }

    /// Every call made so far, as (operation, argument)
    pub fn calls(&self) -> Vec<(&'static str, String)> {
        self.calls.borrow().clone()
    }

    /// Current registry contents
    pub fn registry(&self) -> Vec<DiscoveredApp> {
        self.registry.borrow().clone()
    }

    /// Wallpaper currently applied by the backend
    pub fn wallpaper(&self) -> Option<String> {
        self.wallpaper.borrow().clone()
    }

    /// Icon served for `path` when none was scripted
    pub fn generated_icon(path: &str) -> String {
        STANDARD.encode(format!("icon:{}", path))
    }

    async fn enter(&self, operation: &'static str, argument: &str) {
        self.calls
            .borrow_mut()
            .push((operation, argument.to_string()));
        let delay = self.path_delays.get(argument).copied().or(self.delay);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn register(&self, operation: &'static str, name: &str, path: &str) -> Result<(), GatewayError> {
        if self.rejected_paths.contains(path) {
            return Err(GatewayError::failed(operation, format!("Invalid path: {}", path)));
        }
        let mut registry = self.registry.borrow_mut();
        if registry.iter().any(|app| app.name == name) {
            return Err(GatewayError::failed(
                operation,
                format!("App '{}' already exists!", name),
            ));
        }
        registry.push(DiscoveredApp::new(name, path));
        Ok(())
    }
}

#[async_trait(?Send)]
impl BackendGateway for MemoryBackend {
    async fn enumerate(&self) -> Result<Vec<DiscoveredApp>, GatewayError> {
        self.enter("enumerate", "").await;
        if self.fail_enumerate {
            return Err(GatewayError::failed("enumerate", "discovery failed"));
        }
        Ok(self.registry())
    }

    async fn fetch_icon(&self, path: &str) -> Result<String, GatewayError> {
        let running = self.icons_in_flight.get() + 1;
        self.icons_in_flight.set(running);
        self.peak_icons_in_flight
            .set(self.peak_icons_in_flight.get().max(running));
        self.enter("fetch_icon", path).await;
        self.icons_in_flight.set(self.icons_in_flight.get() - 1);

        if self.failing_icons.contains(path) {
            return Err(GatewayError::failed("fetch_icon", "Failed to load icon."));
        }
        Ok(self
            .icons
            .get(path)
            .cloned()
            .unwrap_or_else(|| Self::generated_icon(path)))
    }

    async fn register_app(&self, name: &str, path: &str) -> Result<String, GatewayError> {
        self.enter("register_app", path).await;
        self.register("register_app", name, path)?;
        Ok(format!("App '{}' added successfully!", name))
    }

    async fn register_dropped_app(&self, name: &str, path: &str) -> Result<String, GatewayError> {
        self.enter("register_dropped_app", path).await;
        self.register("register_dropped_app", name, path)?;
        Ok(format!("App '{}' added successfully with icon!", name))
    }

    async fn launch(&self, path: &str) -> Result<String, GatewayError> {
        self.enter("launch", path).await;
        if self.failing_launches.contains(path) {
            return Err(GatewayError::failed("launch", "executable missing"));
        }
        Ok(format!("Launched: {}", path))
    }

    async fn set_wallpaper(&self, path: &str) -> Result<(), GatewayError> {
        self.enter("set_wallpaper", path).await;
        if self.fail_wallpaper {
            return Err(GatewayError::failed("set_wallpaper", "unsupported format"));
        }
        *self.wallpaper.borrow_mut() = Some(path.to_string());
        Ok(())
    }

    async fn clear_wallpaper(&self) -> Result<(), GatewayError> {
        self.enter("clear_wallpaper", "").await;
        if self.fail_wallpaper {
            return Err(GatewayError::failed("clear_wallpaper", "wallpaper service unavailable"));
        }
        *self.wallpaper.borrow_mut() = None;
        Ok(())
    }
}
