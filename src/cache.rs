//! Keyed query cache for remote market data
//!
//! Decouples render-side reads from network fetches: each (resource,
//! parameters) key holds the last-known value, its freshness timestamp, and
//! in-flight request state. At most one fetch per key is outstanding at a
//! time, and each started fetch carries a generation number so a superseded
//! response is discarded instead of overwriting a newer one.
//!
//! Nothing is ever evicted; old keys keep their data when parameters change
//! so switching back is instant.

use crate::types::{CoinDetail, CoinSnapshot, Currency, PriceSeries};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Identity of one cacheable remote resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Market listing in a currency
    Listing(Currency),
    /// Extended detail for a coin
    Detail(String),
    /// Price history for a coin in a currency
    History(String, Currency),
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Listing(currency) => write!(f, "listing:{currency}"),
            CacheKey::Detail(coin_id) => write!(f, "detail:{coin_id}"),
            CacheKey::History(coin_id, currency) => write!(f, "history:{coin_id}:{currency}"),
        }
    }
}

/// A cached fetch result
#[derive(Debug, Clone)]
pub enum CachedValue {
    Listing(Vec<CoinSnapshot>),
    Detail(CoinDetail),
    History(PriceSeries),
}

#[derive(Debug, Default)]
struct CacheEntry {
    value: Option<CachedValue>,
    fetched_at: Option<DateTime<Utc>>,
    /// Generation of the most recently started fetch for this key
    generation: u64,
    in_flight: bool,
}

/// In-memory cache keyed by [`CacheKey`]
pub struct QueryCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl QueryCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Claims the right to fetch a key
    ///
    /// Returns the generation the caller must present when completing or
    /// failing the fetch, or `None` when a fetch for this key is already
    /// outstanding (request deduplication).
    pub async fn begin_fetch(&self, key: &CacheKey) -> Option<u64> {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(key.clone()).or_default();
        if entry.in_flight {
            tracing::debug!(%key, "Fetch already in flight, deduplicating");
            return None;
        }
        entry.in_flight = true;
        entry.generation += 1;
        Some(entry.generation)
    }

    /// Stores a completed fetch result
    ///
    /// The value is applied only if `generation` is still the latest started
    /// for the key; a superseded response is dropped. Returns whether the
    /// value was applied.
    pub async fn complete_fetch(
        &self,
        key: &CacheKey,
        generation: u64,
        value: CachedValue,
    ) -> bool {
        let mut entries = self.entries.write().await;
        let entry = entries.entry(key.clone()).or_default();
        if generation != entry.generation {
            tracing::debug!(%key, generation, latest = entry.generation, "Discarding superseded response");
            return false;
        }
        entry.value = Some(value);
        entry.fetched_at = Some(Utc::now());
        entry.in_flight = false;
        true
    }

    /// Records a failed fetch
    ///
    /// The previous value, if any, stays in place (stale-but-shown); only
    /// the in-flight flag is cleared so the next scheduled attempt can run.
    pub async fn fail_fetch(&self, key: &CacheKey, generation: u64) {
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get_mut(key) {
            if generation == entry.generation {
                entry.in_flight = false;
            }
        }
    }

    /// Gets the last-known value for a key, regardless of age
    pub async fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        let entries = self.entries.read().await;
        entries.get(key).and_then(|entry| entry.value.clone())
    }

    /// Gets the cached listing for a currency
    pub async fn listing(&self, currency: Currency) -> Option<Vec<CoinSnapshot>> {
        match self.get(&CacheKey::Listing(currency)).await {
            Some(CachedValue::Listing(coins)) => Some(coins),
            _ => None,
        }
    }

    /// Gets the cached detail for a coin
    pub async fn detail(&self, coin_id: &str) -> Option<CoinDetail> {
        match self.get(&CacheKey::Detail(coin_id.to_string())).await {
            Some(CachedValue::Detail(detail)) => Some(detail),
            _ => None,
        }
    }

    /// Gets the cached history for a coin in a currency
    pub async fn history(&self, coin_id: &str, currency: Currency) -> Option<PriceSeries> {
        match self
            .get(&CacheKey::History(coin_id.to_string(), currency))
            .await
        {
            Some(CachedValue::History(series)) => Some(series),
            _ => None,
        }
    }

    /// When the key's value was last refreshed
    pub async fn fetched_at(&self, key: &CacheKey) -> Option<DateTime<Utc>> {
        let entries = self.entries.read().await;
        entries.get(key).and_then(|entry| entry.fetched_at)
    }

    /// Whether a fetch for the key is currently outstanding
    pub async fn is_fetching(&self, key: &CacheKey) -> bool {
        let entries = self.entries.read().await;
        entries.get(key).map(|e| e.in_flight).unwrap_or(false)
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
