//! AppItem entity - a launchable application in the catalog
//!
//! The serialized field names match the persisted snapshot layout
//! (`id`, `name`, `icon`, `path`, `lastUsed`).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Catalog-local identifier, unique within a session
pub type AppId = u64;

/// A launchable application
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppItem {
    /// Catalog id, assigned by the catalog store (0 until stored)
    pub id: AppId,
    /// Display name
    pub name: String,
    /// Base64-encoded icon image
    pub icon: String,
    /// Executable path, used to launch and to detect duplicates
    pub path: String,
    /// Last successful launch, Unix epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<i64>,
}

impl AppItem {
    /// Create an unsaved app item with no icon
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            icon: String::new(),
            path: path.into(),
            last_used: None,
        }
    }

    /// Builder: set the encoded icon
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Builder: set the last-used timestamp
    pub fn with_last_used(mut self, millis: i64) -> Self {
        self.last_used = Some(millis);
        self
    }

    /// Builder: set the id
    pub fn with_id(mut self, id: AppId) -> Self {
        self.id = id;
        self
    }

    /// Recency key for sorting; never-launched apps count as oldest
    pub fn recency(&self) -> i64 {
        self.last_used.unwrap_or(0)
    }

    /// Decode the icon payload into raw image bytes
    pub fn icon_bytes(&self) -> Option<Vec<u8>> {
        if self.icon.is_empty() {
            return None;
        }
        STANDARD.decode(&self.icon).ok()
    }
}
