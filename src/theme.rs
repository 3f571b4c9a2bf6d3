//! Theme preference
//!
//! Cosmetic dark/light flag, persisted as `"dark"` / `"light"` under the
//! theme key. An unknown stored value falls back to light, matching the
//! dashboard's default.

use crate::{constants::STORAGE_KEY_THEME, storage::StorageBackend, types::Theme};
use std::sync::Arc;

/// Persisted theme flag
pub struct ThemeStore {
    theme: Theme,
    storage: Arc<dyn StorageBackend>,
}

impl ThemeStore {
    /// Rehydrates the theme from storage, defaulting to light
    pub fn load(storage: Arc<dyn StorageBackend>) -> Self {
        let theme = storage
            .read(STORAGE_KEY_THEME)
            .ok()
            .flatten()
            .and_then(|raw| Theme::from_str_opt(&raw))
            .unwrap_or(Theme::Light);
        Self { theme, storage }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    /// Flips the theme and persists it
    pub fn toggle(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.storage.write(STORAGE_KEY_THEME, self.theme.as_str()) {
            tracing::warn!(error = %e, "Failed to persist theme");
        }
        self.theme
    }
}
