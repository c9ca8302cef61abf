//! CatalogPresenter - Formats catalog views for display

use chrono::{DateTime, Local};

use crate::domain::entities::{AppId, AppItem};

/// View model for one catalog row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppRowViewModel {
    pub id: AppId,
    pub title: String,
    pub subtitle: String,
    pub last_used: String,
    pub has_icon: bool,
}

/// Presenter for catalog views
pub struct CatalogPresenter {
    /// Current view models
    items: Vec<AppRowViewModel>,
}

impl CatalogPresenter {
    /// Create a new catalog presenter
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Present an already filtered and ordered view
    pub fn present<'a>(&mut self, apps: impl IntoIterator<Item = &'a AppItem>) {
        self.items = apps.into_iter().map(Self::create_view_model).collect();
    }

    fn create_view_model(item: &AppItem) -> AppRowViewModel {
        AppRowViewModel {
            id: item.id,
            title: item.name.clone(),
            subtitle: item.path.clone(),
            last_used: format_last_used(item.last_used),
            has_icon: item.icon_bytes().is_some_and(|b| !b.is_empty()),
        }
    }

    /// Render the rows as an aligned text table
    pub fn render(&self) -> String {
        if self.items.is_empty() {
            return "No applications".to_string();
        }

        let name_width = self
            .items
            .iter()
            .map(|i| i.title.chars().count())
            .max()
            .unwrap_or(0)
            .max(4);

        let mut out = String::new();
        for item in &self.items {
            out.push_str(&format!(
                "{:>4}  {:<width$}  {:<16}  {}\n",
                item.id,
                item.title,
                item.last_used,
                item.subtitle,
                width = name_width
            ));
        }
        out
    }

    /// Get current view models
    pub fn items(&self) -> &[AppRowViewModel] {
        &self.items
    }

    /// Clear results
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get count
    pub fn count(&self) -> usize {
        self.items.len()
    }
}

impl Default for CatalogPresenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable last-used time in local time
pub fn format_last_used(millis: Option<i64>) -> String {
    millis
        .and_then(DateTime::from_timestamp_millis)
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "never".to_string())
}
