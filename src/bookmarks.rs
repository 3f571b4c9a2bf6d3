//! Bookmarked coins
//!
//! A duplicate-free set of coin ids kept in insertion order and rewritten
//! to storage as a sequence after every toggle.

use crate::{constants::STORAGE_KEY_BOOKMARKS, error::StorageError, storage::StorageBackend};
use std::sync::Arc;

/// In-memory bookmark set persisted through an injected backend
pub struct BookmarkStore {
    ids: Vec<String>,
    storage: Arc<dyn StorageBackend>,
}

impl BookmarkStore {
    /// Rehydrates the bookmark set from storage
    pub fn load(storage: Arc<dyn StorageBackend>) -> Result<Self, StorageError> {
        let ids: Vec<String> = match storage.read(STORAGE_KEY_BOOKMARKS)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| StorageError::corrupt(STORAGE_KEY_BOOKMARKS, e.to_string()))?,
            None => Vec::new(),
        };
        Ok(Self { ids, storage })
    }

    /// Rehydrates the bookmark set, starting empty when storage is missing
    /// or unreadable
    pub fn load_or_default(storage: Arc<dyn StorageBackend>) -> Self {
        match Self::load(storage.clone()) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load bookmarks, starting empty");
                Self {
                    ids: Vec::new(),
                    storage,
                }
            }
        }
    }

    /// Adds the id if absent, removes it if present, then persists
    ///
    /// Returns whether the coin is bookmarked after the toggle.
    pub fn toggle(&mut self, coin_id: &str) -> bool {
        let bookmarked = if let Some(pos) = self.ids.iter().position(|id| id == coin_id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(coin_id.to_string());
            true
        };
        self.persist();
        bookmarked
    }

    /// Pure membership test
    pub fn is_bookmarked(&self, coin_id: &str) -> bool {
        self.ids.iter().any(|id| id == coin_id)
    }

    /// Bookmarked coin ids in insertion order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.ids) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode bookmarks");
                return;
            }
        };
        if let Err(e) = self.storage.write(STORAGE_KEY_BOOKMARKS, &raw) {
            tracing::warn!(error = %e, "Failed to persist bookmarks");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn toggle_is_idempotent_over_two_applications() {
        let storage = Arc::new(MemoryStorage::new());
        let mut bookmarks = BookmarkStore::load(storage).unwrap();

        assert!(bookmarks.toggle("bitcoin"));
        assert!(bookmarks.is_bookmarked("bitcoin"));
        assert!(!bookmarks.toggle("bitcoin"));
        assert!(!bookmarks.is_bookmarked("bitcoin"));
        assert!(bookmarks.is_empty());
    }

    #[test]
    fn set_contains_no_duplicates() {
        let storage = Arc::new(MemoryStorage::new());
        let mut bookmarks = BookmarkStore::load(storage).unwrap();

        bookmarks.toggle("bitcoin");
        bookmarks.toggle("ethereum");
        bookmarks.toggle("bitcoin");
        bookmarks.toggle("bitcoin");

        assert_eq!(bookmarks.ids(), ["ethereum", "bitcoin"]);
    }

    #[test]
    fn reload_preserves_the_same_set() {
        let storage = Arc::new(MemoryStorage::new());
        let mut bookmarks = BookmarkStore::load(storage.clone()).unwrap();
        bookmarks.toggle("bitcoin");
        bookmarks.toggle("solana");

        let reloaded = BookmarkStore::load(storage).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded.is_bookmarked("bitcoin"));
        assert!(reloaded.is_bookmarked("solana"));
    }
}
