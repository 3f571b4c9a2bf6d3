//! Crypto dashboard tracker
//!
//! [`CryptoTracker`] is the application-state object behind the dashboard:
//! it owns the market-data provider, the keyed query cache, the three user
//! stores, the active currency and the current selection. Everything is
//! injected at construction; there is no global instance.

use crate::{
    alerts::AlertStore,
    bookmarks::BookmarkStore,
    cache::{CacheKey, CachedValue, QueryCache},
    constants::{HISTORY_WINDOW_DAYS, LISTING_REFRESH_INTERVAL_SECS},
    filter::filter_listing,
    metrics::{MetricsCollector, ResourceKind, ResourceMetrics},
    provider::MarketDataProvider,
    storage::StorageBackend,
    theme::ThemeStore,
    types::{AlertDirection, CoinDetail, CoinSnapshot, Currency, PriceAlert, PriceSeries, Theme},
    view::{alert_rows, AlertRow, CoinCard, CoinModal},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use uuid::Uuid;

/// Everything the main page renders for one (search, bookmark-flag) input
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// True only before the first listing fetch for the active currency
    /// has resolved
    pub loading: bool,
    pub currency: Currency,
    pub theme: Theme,
    pub cards: Vec<CoinCard>,
    pub alert_rows: Vec<AlertRow>,
}

/// Dashboard application state: polling, cache, stores, selection
pub struct CryptoTracker {
    provider: Arc<dyn MarketDataProvider>,
    cache: QueryCache,
    metrics: MetricsCollector,
    currency: RwLock<Currency>,
    selected: RwLock<Option<String>>,
    alerts: RwLock<AlertStore>,
    bookmarks: RwLock<BookmarkStore>,
    theme: RwLock<ThemeStore>,
}

impl CryptoTracker {
    /// Creates a tracker with an injected provider and storage backend
    ///
    /// User state (alerts, bookmarks, theme) is rehydrated from storage;
    /// unreadable values start their store empty.
    pub fn new(provider: Arc<dyn MarketDataProvider>, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            provider,
            cache: QueryCache::new(),
            metrics: MetricsCollector::new(),
            currency: RwLock::new(Currency::USD),
            selected: RwLock::new(None),
            alerts: RwLock::new(AlertStore::load_or_default(storage.clone())),
            bookmarks: RwLock::new(BookmarkStore::load_or_default(storage.clone())),
            theme: RwLock::new(ThemeStore::load(storage)),
        }
    }

    /// Starts the listing poll loop
    ///
    /// Fetches immediately, then re-fetches the listing for the active
    /// currency every 30 seconds unconditionally - no backoff, a failed
    /// cycle is simply retried on the next tick. Abort the returned handle
    /// when the last consumer unmounts.
    pub fn start_polling(self: &Arc<Self>) -> JoinHandle<()> {
        let tracker = self.clone();
        tokio::spawn(async move {
            tracing::info!(
                interval_secs = LISTING_REFRESH_INTERVAL_SECS,
                provider = tracker.provider.provider_name(),
                "Starting listing poll"
            );
            loop {
                tracker.refresh_listing().await;
                sleep(Duration::from_secs(LISTING_REFRESH_INTERVAL_SECS)).await;
            }
        })
    }

    /// Fetches the listing for the active currency into the cache
    pub async fn refresh_listing(&self) {
        let currency = *self.currency.read().await;
        self.fetch_resource(CacheKey::Listing(currency)).await;
    }

    /// Runs one fetch for a cache key, deduplicated and generation-guarded
    ///
    /// A failure leaves the previous cached value visible and is not
    /// surfaced to the caller; the next scheduled attempt is the retry.
    async fn fetch_resource(&self, key: CacheKey) {
        let Some(generation) = self.cache.begin_fetch(&key).await else {
            return;
        };

        let start = Instant::now();
        let (resource, result) = match &key {
            CacheKey::Listing(currency) => (
                ResourceKind::Listing,
                self.provider
                    .fetch_listing(*currency)
                    .await
                    .map(CachedValue::Listing),
            ),
            CacheKey::Detail(coin_id) => (
                ResourceKind::Detail,
                self.provider
                    .fetch_detail(coin_id)
                    .await
                    .map(CachedValue::Detail),
            ),
            CacheKey::History(coin_id, currency) => (
                ResourceKind::History,
                self.provider
                    .fetch_history(coin_id, *currency, HISTORY_WINDOW_DAYS)
                    .await
                    .map(CachedValue::History),
            ),
        };

        match result {
            Ok(value) => {
                self.cache.complete_fetch(&key, generation, value).await;
                self.metrics
                    .record_request(resource, start.elapsed(), true)
                    .await;
            }
            Err(e) => {
                tracing::warn!(%key, error = %e, "Fetch failed, keeping cached value");
                self.cache.fail_fetch(&key, generation).await;
                self.metrics
                    .record_request(resource, start.elapsed(), false)
                    .await;
            }
        }
    }

    /// The active display currency
    pub async fn currency(&self) -> Currency {
        *self.currency.read().await
    }

    /// Switches the display currency
    ///
    /// The new listing key is fetched right away and, when a coin is
    /// selected, its history is re-fetched in the new denomination. The old
    /// currency's data stays cached.
    pub async fn set_currency(&self, currency: Currency) {
        *self.currency.write().await = currency;

        let selected = self.selected.read().await.clone();
        match selected {
            Some(coin_id) => {
                tokio::join!(
                    self.fetch_resource(CacheKey::Listing(currency)),
                    self.fetch_resource(CacheKey::History(coin_id, currency)),
                );
            }
            None => self.fetch_resource(CacheKey::Listing(currency)).await,
        }
    }

    /// The currently selected coin, if any
    pub async fn selected_coin(&self) -> Option<String> {
        self.selected.read().await.clone()
    }

    /// Selects a coin and fetches its detail and history
    pub async fn select_coin(&self, coin_id: &str) {
        *self.selected.write().await = Some(coin_id.to_string());

        let currency = *self.currency.read().await;
        tokio::join!(
            self.fetch_resource(CacheKey::Detail(coin_id.to_string())),
            self.fetch_resource(CacheKey::History(coin_id.to_string(), currency)),
        );
    }

    /// Closes the detail modal; cached detail and history stay in place
    pub async fn clear_selection(&self) {
        *self.selected.write().await = None;
    }

    /// Re-fetches detail and history for the selection, if any
    ///
    /// Called when the window regains focus; a no-op without a selection.
    pub async fn on_focus(&self) {
        let Some(coin_id) = self.selected.read().await.clone() else {
            return;
        };
        let currency = *self.currency.read().await;
        tokio::join!(
            self.fetch_resource(CacheKey::Detail(coin_id.clone())),
            self.fetch_resource(CacheKey::History(coin_id, currency)),
        );
    }

    /// Last-known listing for the active currency
    pub async fn listing(&self) -> Option<Vec<CoinSnapshot>> {
        let currency = *self.currency.read().await;
        self.cache.listing(currency).await
    }

    /// Last-known detail for a coin
    pub async fn detail(&self, coin_id: &str) -> Option<CoinDetail> {
        self.cache.detail(coin_id).await
    }

    /// Last-known history for a coin in the active currency
    pub async fn history(&self, coin_id: &str) -> Option<PriceSeries> {
        let currency = *self.currency.read().await;
        self.cache.history(coin_id, currency).await
    }

    /// Creates an alert and persists the list
    pub async fn set_alert(
        &self,
        coin_id: &str,
        target_price: f64,
        direction: AlertDirection,
    ) -> PriceAlert {
        self.alerts
            .write()
            .await
            .set_alert(coin_id, target_price, direction)
    }

    /// Creates an alert from raw form input; empty or non-numeric input is
    /// a no-op returning `None`
    pub async fn set_alert_from_input(
        &self,
        coin_id: &str,
        raw_target: &str,
        direction: AlertDirection,
    ) -> Option<PriceAlert> {
        self.alerts
            .write()
            .await
            .set_alert_from_input(coin_id, raw_target, direction)
    }

    /// Dismisses an alert by id
    pub async fn remove_alert(&self, id: Uuid) -> bool {
        self.alerts.write().await.remove_alert(id)
    }

    /// All alerts in insertion order
    pub async fn alerts(&self) -> Vec<PriceAlert> {
        self.alerts.read().await.alerts().to_vec()
    }

    /// Toggles a bookmark; returns whether the coin is bookmarked after
    pub async fn toggle_bookmark(&self, coin_id: &str) -> bool {
        self.bookmarks.write().await.toggle(coin_id)
    }

    pub async fn is_bookmarked(&self, coin_id: &str) -> bool {
        self.bookmarks.read().await.is_bookmarked(coin_id)
    }

    /// Flips the theme and persists it
    pub async fn toggle_theme(&self) -> Theme {
        self.theme.write().await.toggle()
    }

    pub async fn theme(&self) -> Theme {
        self.theme.read().await.theme()
    }

    /// Per-resource fetch latency and success-rate metrics
    pub async fn metrics(&self) -> Vec<ResourceMetrics> {
        self.metrics.all_metrics().await
    }

    /// Composes the main page for the given search term and bookmark flag
    ///
    /// Pure derivation over cached state: listing filtered to cards plus
    /// the active-alerts panel rows, all denominated in the active currency.
    pub async fn dashboard(&self, search_term: &str, bookmarked_only: bool) -> Dashboard {
        let currency = *self.currency.read().await;
        let theme = self.theme.read().await.theme();
        let listing = self.cache.listing(currency).await;

        let (cards, rows) = match &listing {
            Some(coins) => {
                let bookmarks = self.bookmarks.read().await;
                let cards = filter_listing(coins, search_term, bookmarks.ids(), bookmarked_only)
                    .into_iter()
                    .map(|coin| {
                        CoinCard::from_snapshot(coin, currency, bookmarks.is_bookmarked(&coin.id))
                    })
                    .collect();
                let alerts = self.alerts.read().await;
                (cards, alert_rows(alerts.alerts(), coins, currency))
            }
            None => (Vec::new(), Vec::new()),
        };

        Dashboard {
            loading: listing.is_none(),
            currency,
            theme,
            cards,
            alert_rows: rows,
        }
    }

    /// Builds the detail modal for the current selection
    ///
    /// Returns `None` until the selected coin's snapshot, detail, and a
    /// non-empty history are all available, the way the dashboard only
    /// opens the modal once everything it renders has arrived.
    pub async fn modal(&self) -> Option<CoinModal> {
        let coin_id = self.selected.read().await.clone()?;
        let currency = *self.currency.read().await;

        let listing = self.cache.listing(currency).await?;
        let snapshot = listing.into_iter().find(|coin| coin.id == coin_id)?;
        let detail = self.cache.detail(&coin_id).await?;
        let series = self.cache.history(&coin_id, currency).await?;
        if series.points.is_empty() {
            return None;
        }

        Some(CoinModal::new(&snapshot, &detail, &series, currency))
    }
}
