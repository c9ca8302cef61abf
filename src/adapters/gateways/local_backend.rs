//! LocalBackend - filesystem-backed app backend
//!
//! Keeps its registry as `name:path` lines in a text file, looks for icons
//! next to the executable, spawns processes directly and records the
//! applied wallpaper in `wallpaper.txt`.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, info, warn};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{BackendGateway, DiscoveredApp};
use crate::domain::errors::GatewayError;

/// 1x1 transparent PNG used when an executable ships no icon
pub const DEFAULT_ICON: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

/// Extensions accepted by `set_wallpaper`
const WALLPAPER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];

/// Icon files looked up next to an executable, in order
const ICON_EXTENSIONS: &[&str] = &["png", "ico"];

/// Filesystem-backed backend
#[derive(Clone, Debug)]
pub struct LocalBackend {
    registry_path: PathBuf,
    wallpaper_path: PathBuf,
}

impl LocalBackend {
    /// Create a backend keeping its files in `data_dir`
    pub fn new(data_dir: &Path) -> Self {
        Self::with_registry(data_dir.join("apps.txt"), data_dir)
    }

    /// Create a backend with an explicit registry file
    pub fn with_registry(registry_path: PathBuf, data_dir: &Path) -> Self {
        Self {
            registry_path,
            wallpaper_path: data_dir.join("wallpaper.txt"),
        }
    }

    /// Get the registry file path
    pub fn registry_path(&self) -> &Path {
        &self.registry_path
    }

    /// Parse registry file content, skipping malformed lines
    fn parse_registry(content: &str) -> Vec<DiscoveredApp> {
        content
            .lines()
            .filter_map(|line| {
                let (name, path) = line.split_once(':')?;
                let (name, path) = (name.trim(), path.trim());
                if name.is_empty() || path.is_empty() {
                    debug!("Skipping registry line {:?}", line);
                    return None;
                }
                Some(DiscoveredApp::new(name, path))
            })
            .collect()
    }

    async fn read_registry(&self) -> io::Result<Vec<DiscoveredApp>> {
        match fs::read_to_string(&self.registry_path).await {
            Ok(content) => Ok(Self::parse_registry(&content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    async fn append_registry(&self, name: &str, path: &str) -> io::Result<()> {
        if let Some(parent) = self.registry_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let mut file = fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.registry_path)
            .await?;
        file.write_all(format!("{}:{}\n", name, path).as_bytes())
            .await?;
        file.flush().await
    }

    async fn register(
        &self,
        operation: &'static str,
        name: &str,
        path: &str,
    ) -> Result<(), GatewayError> {
        let name = name.trim();
        let path = path.trim();
        if name.is_empty() || path.is_empty() {
            return Err(GatewayError::failed(operation, "App name and path are required"));
        }
        if name.contains(':') || name.contains('\n') || path.contains('\n') {
            return Err(GatewayError::failed(
                operation,
                format!("Invalid app name '{}'", name),
            ));
        }

        let registry = self
            .read_registry()
            .await
            .map_err(|e| GatewayError::failed(operation, e))?;
        if registry.iter().any(|app| app.name == name) {
            return Err(GatewayError::failed(
                operation,
                format!("App '{}' already exists!", name),
            ));
        }

        self.append_registry(name, path)
            .await
            .map_err(|e| GatewayError::failed(operation, e))?;
        info!("Registered app '{}' at {}", name, path);
        Ok(())
    }

    fn has_extension(path: &Path, allowed: &[&str]) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| allowed.iter().any(|a| a.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }
}

#[async_trait(?Send)]
impl BackendGateway for LocalBackend {
    async fn enumerate(&self) -> Result<Vec<DiscoveredApp>, GatewayError> {
        let apps = self
            .read_registry()
            .await
            .map_err(|e| GatewayError::failed("enumerate", e))?;
        debug!("Enumerated {} apps from {:?}", apps.len(), self.registry_path);
        Ok(apps)
    }

    async fn fetch_icon(&self, path: &str) -> Result<String, GatewayError> {
        let exe = PathBuf::from(path);
        if fs::metadata(&exe).await.is_err() {
            return Err(GatewayError::failed(
                "fetch_icon",
                format!("Failed to load icon: {} is not readable", path),
            ));
        }

        let candidates = if Self::has_extension(&exe, ICON_EXTENSIONS) {
            vec![exe.clone()]
        } else {
            ICON_EXTENSIONS
                .iter()
                .map(|ext| exe.with_extension(ext))
                .collect()
        };

        for candidate in candidates {
            if let Ok(bytes) = fs::read(&candidate).await {
                debug!("Loaded icon for {} from {:?}", path, candidate);
                return Ok(STANDARD.encode(bytes));
            }
        }

        debug!("No icon next to {}, using default", path);
        Ok(DEFAULT_ICON.to_string())
    }

    async fn register_app(&self, name: &str, path: &str) -> Result<String, GatewayError> {
        self.register("register_app", name, path).await?;
        Ok(format!("App '{}' added successfully!", name.trim()))
    }

    async fn register_dropped_app(&self, name: &str, path: &str) -> Result<String, GatewayError> {
        self.register("register_dropped_app", name, path).await?;
        Ok(format!("App '{}' added successfully with icon!", name.trim()))
    }

    async fn launch(&self, path: &str) -> Result<String, GatewayError> {
        info!("Launching app with path: {}", path);
        tokio::process::Command::new(path).spawn().map_err(|e| {
            warn!("Failed to launch {}: {}", path, e);
            GatewayError::failed("launch", e)
        })?;
        Ok(format!("Launched: {}", path))
    }

    async fn set_wallpaper(&self, path: &str) -> Result<(), GatewayError> {
        let image = Path::new(path);
        if !Self::has_extension(image, WALLPAPER_EXTENSIONS) {
            return Err(GatewayError::failed(
                "set_wallpaper",
                format!("Unsupported image format: {}", path),
            ));
        }
        if fs::metadata(image).await.is_err() {
            return Err(GatewayError::failed(
                "set_wallpaper",
                format!("Image not found: {}", path),
            ));
        }

        if let Some(parent) = self.wallpaper_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| GatewayError::failed("set_wallpaper", e))?;
        }
        fs::write(&self.wallpaper_path, path)
            .await
            .map_err(|e| GatewayError::failed("set_wallpaper", e))?;
        info!("Wallpaper set to {}", path);
        Ok(())
    }

    async fn clear_wallpaper(&self) -> Result<(), GatewayError> {
        match fs::remove_file(&self.wallpaper_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GatewayError::failed("clear_wallpaper", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(dir: &Path) -> LocalBackend {
        LocalBackend::new(dir)
    }

    #[test]
    fn test_parse_registry_keeps_drive_letters() {
        let apps = LocalBackend::parse_registry(
            "Maps:C:\\Apps\\maps.exe\nbroken line\n:missing-name\nApex:/opt/apex\n",
        );
        assert_eq!(
            apps,
            vec![
                DiscoveredApp::new("Maps", "C:\\Apps\\maps.exe"),
                DiscoveredApp::new("Apex", "/opt/apex"),
            ]
        );
    }

    #[tokio::test]
    async fn test_register_then_enumerate_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(dir.path());

        assert!(backend.enumerate().await.unwrap().is_empty());

        let msg = backend.register_app("Zed", "/opt/zed").await.unwrap();
        assert_eq!(msg, "App 'Zed' added successfully!");
        let msg = backend.register_dropped_app("Apex", "/opt/apex").await.unwrap();
        assert_eq!(msg, "App 'Apex' added successfully with icon!");

        let names: Vec<_> = backend
            .enumerate()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Zed", "Apex"]);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_name() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(dir.path());

        backend.register_app("Zed", "/opt/zed").await.unwrap();
        let err = backend.register_dropped_app("Zed", "/other").await.unwrap_err();
        assert_eq!(
            err,
            GatewayError::failed("register_dropped_app", "App 'Zed' already exists!")
        );
    }

    #[tokio::test]
    async fn test_fetch_icon_prefers_sibling_image() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("tool.exe");
        std::fs::write(&exe, b"MZ").unwrap();
        std::fs::write(dir.path().join("tool.png"), b"png-bytes").unwrap();

        let backend = backend(dir.path());
        let icon = backend.fetch_icon(exe.to_str().unwrap()).await.unwrap();
        assert_eq!(STANDARD.decode(icon).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn test_fetch_icon_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("tool");
        std::fs::write(&exe, b"#!/bin/sh").unwrap();

        let backend = backend(dir.path());
        let icon = backend.fetch_icon(exe.to_str().unwrap()).await.unwrap();
        assert_eq!(icon, DEFAULT_ICON);
    }

    #[tokio::test]
    async fn test_fetch_icon_fails_for_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(dir.path());

        let missing = dir.path().join("missing.exe");
        let err = backend.fetch_icon(missing.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Failed { operation: "fetch_icon", .. }));
    }

    #[tokio::test]
    async fn test_launch_missing_executable_fails() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(dir.path());

        let missing = dir.path().join("nope");
        let err = backend.launch(missing.to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Failed { operation: "launch", .. }));
    }

    #[tokio::test]
    async fn test_wallpaper_set_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(dir.path());
        let image = dir.path().join("sea.PNG");
        std::fs::write(&image, b"png").unwrap();

        backend.set_wallpaper(image.to_str().unwrap()).await.unwrap();
        let stored = std::fs::read_to_string(dir.path().join("wallpaper.txt")).unwrap();
        assert_eq!(stored, image.to_str().unwrap());

        backend.clear_wallpaper().await.unwrap();
        assert!(!dir.path().join("wallpaper.txt").exists());
        // Clearing twice is fine
        backend.clear_wallpaper().await.unwrap();
    }

    #[tokio::test]
    async fn test_wallpaper_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let backend = backend(dir.path());
        let doc = dir.path().join("notes.txt");
        std::fs::write(&doc, b"hi").unwrap();

        assert!(backend.set_wallpaper(doc.to_str().unwrap()).await.is_err());
        let missing = dir.path().join("missing.png");
        assert!(backend.set_wallpaper(missing.to_str().unwrap()).await.is_err());
    }
}
