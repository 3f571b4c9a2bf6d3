//! User-defined price alerts
//!
//! Alerts are append-only user state: each creation gets a fresh id and
//! timestamp, and the full list is rewritten to storage on every change.
//! Whether an alert is "met" is evaluated presentationally against the
//! current listing (see [`crate::view::alert_rows`]); alerts are never
//! auto-removed when their condition holds.

use crate::{
    constants::STORAGE_KEY_ALERTS,
    error::StorageError,
    storage::StorageBackend,
    types::{AlertDirection, PriceAlert},
};
use std::sync::Arc;
use uuid::Uuid;

/// In-memory alert list persisted through an injected backend
pub struct AlertStore {
    alerts: Vec<PriceAlert>,
    storage: Arc<dyn StorageBackend>,
}

impl AlertStore {
    /// Rehydrates the alert list from storage
    ///
    /// A corrupt stored value surfaces as [`StorageError::Corrupt`] instead
    /// of being silently dropped.
    pub fn load(storage: Arc<dyn StorageBackend>) -> Result<Self, StorageError> {
        let alerts = match storage.read(STORAGE_KEY_ALERTS)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| StorageError::corrupt(STORAGE_KEY_ALERTS, e.to_string()))?,
            None => Vec::new(),
        };
        Ok(Self { alerts, storage })
    }

    /// Rehydrates the alert list, starting empty when storage is missing
    /// or unreadable
    pub fn load_or_default(storage: Arc<dyn StorageBackend>) -> Self {
        match Self::load(storage.clone()) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load alerts, starting empty");
                Self {
                    alerts: Vec::new(),
                    storage,
                }
            }
        }
    }

    /// Creates a new alert and persists the full list
    pub fn set_alert(
        &mut self,
        coin_id: &str,
        target_price: f64,
        direction: AlertDirection,
    ) -> PriceAlert {
        let alert = PriceAlert::new(coin_id, target_price, direction);
        self.alerts.push(alert.clone());
        self.persist();
        alert
    }

    /// Creates an alert from raw form input
    ///
    /// Empty or non-numeric input is a no-op returning `None`, leaving the
    /// form open for correction.
    pub fn set_alert_from_input(
        &mut self,
        coin_id: &str,
        raw_target: &str,
        direction: AlertDirection,
    ) -> Option<PriceAlert> {
        let trimmed = raw_target.trim();
        if trimmed.is_empty() {
            return None;
        }
        let target_price: f64 = trimmed.parse().ok()?;
        if !target_price.is_finite() {
            return None;
        }
        Some(self.set_alert(coin_id, target_price, direction))
    }

    /// Dismisses an alert by id and persists
    ///
    /// Returns whether an alert was removed.
    pub fn remove_alert(&mut self, id: Uuid) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        let removed = self.alerts.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// All alerts in insertion order
    pub fn alerts(&self) -> &[PriceAlert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Overwrites the stored list with the in-memory one; write failures
    /// are logged and swallowed (best-effort persistence)
    fn persist(&self) {
        let raw = match serde_json::to_string(&self.alerts) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode alerts");
                return;
            }
        };
        if let Err(e) = self.storage.write(STORAGE_KEY_ALERTS, &raw) {
            tracing::warn!(error = %e, "Failed to persist alerts");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store() -> (AlertStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        (AlertStore::load(storage.clone()).unwrap(), storage)
    }

    #[test]
    fn creation_grows_the_list_by_one_with_a_fresh_id() {
        let (mut alerts, _) = store();

        let first = alerts.set_alert("bitcoin", 50_000.0, AlertDirection::Above);
        assert_eq!(alerts.len(), 1);

        let second = alerts.set_alert("bitcoin", 40_000.0, AlertDirection::Below);
        assert_eq!(alerts.len(), 2);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn empty_or_invalid_input_is_a_no_op() {
        let (mut alerts, _) = store();

        assert!(alerts
            .set_alert_from_input("bitcoin", "", AlertDirection::Above)
            .is_none());
        assert!(alerts
            .set_alert_from_input("bitcoin", "   ", AlertDirection::Above)
            .is_none());
        assert!(alerts
            .set_alert_from_input("bitcoin", "not-a-price", AlertDirection::Above)
            .is_none());
        assert!(alerts
            .set_alert_from_input("bitcoin", "NaN", AlertDirection::Above)
            .is_none());
        assert!(alerts.is_empty());

        let created = alerts
            .set_alert_from_input("bitcoin", " 50000 ", AlertDirection::Above)
            .unwrap();
        assert_eq!(created.target_price, 50_000.0);
    }

    #[test]
    fn reload_preserves_insertion_order() {
        let (mut alerts, storage) = store();
        alerts.set_alert("bitcoin", 50_000.0, AlertDirection::Above);
        alerts.set_alert("ethereum", 3_000.0, AlertDirection::Below);

        let reloaded = AlertStore::load(storage).unwrap();
        assert_eq!(reloaded.alerts(), alerts.alerts());
        assert_eq!(reloaded.alerts()[0].coin_id, "bitcoin");
        assert_eq!(reloaded.alerts()[1].coin_id, "ethereum");
    }

    #[test]
    fn dismissal_removes_and_persists() {
        let (mut alerts, storage) = store();
        let kept = alerts.set_alert("bitcoin", 50_000.0, AlertDirection::Above);
        let dismissed = alerts.set_alert("ethereum", 3_000.0, AlertDirection::Below);

        assert!(alerts.remove_alert(dismissed.id));
        assert!(!alerts.remove_alert(dismissed.id));
        assert_eq!(alerts.len(), 1);

        let reloaded = AlertStore::load(storage).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.alerts()[0].id, kept.id);
    }

    #[test]
    fn corrupt_storage_is_a_typed_error() {
        let storage = Arc::new(MemoryStorage::new());
        storage.write(STORAGE_KEY_ALERTS, "{not json").unwrap();

        assert!(matches!(
            AlertStore::load(storage.clone()),
            Err(StorageError::Corrupt { .. })
        ));
        assert!(AlertStore::load_or_default(storage).is_empty());
    }
}
