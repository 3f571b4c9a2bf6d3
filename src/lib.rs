//! # Crypto Price Tracker Core
//!
//! Headless core for a cryptocurrency price dashboard: polls a public
//! market-data API for the top coins, caches listing/detail/history
//! responses per (resource, parameters) key, and keeps the user's price
//! alerts, bookmarks, and theme in injected key-value storage. Frontends
//! render the derived view-models ([`view::CoinCard`], [`view::CoinModal`],
//! [`view::AlertRow`]) and never talk to the network themselves.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use crypto_tracker_core::{
//!     providers::CoinGeckoProvider, storage::FileStorage, AlertDirection, CryptoTracker,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = Arc::new(CoinGeckoProvider::new()?);
//! let storage = Arc::new(FileStorage::new("./state")?);
//! let tracker = Arc::new(CryptoTracker::new(provider, storage));
//!
//! // Keep the listing fresh while the dashboard is open.
//! let poll = tracker.start_polling();
//!
//! // Render the main page for the current search input.
//! let page = tracker.dashboard("bit", false).await;
//! for card in &page.cards {
//!     println!("{} {} {}", card.name, card.price_label, card.change_label);
//! }
//!
//! // Bookmark a coin and set a price alert from form input.
//! tracker.toggle_bookmark("bitcoin").await;
//! let alert = tracker
//!     .set_alert_from_input("bitcoin", "50000", AlertDirection::Above)
//!     .await;
//! assert!(alert.is_some());
//!
//! // Open the detail modal with its 7-day chart.
//! tracker.select_coin("bitcoin").await;
//! if let Some(modal) = tracker.modal().await {
//!     println!("{}: {} points", modal.name, modal.chart.prices.len());
//! }
//!
//! poll.abort();
//! # Ok(())
//! # }
//! ```

pub mod alerts;
pub mod bookmarks;
pub mod cache;
pub mod constants;
pub mod error;
pub mod filter;
pub mod format;
pub mod metrics;
pub mod provider;
pub mod providers;
pub mod storage;
pub mod theme;
pub mod tracker;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use error::{ProviderError, StorageError};
pub use filter::filter_listing;
pub use format::{format_change, format_currency};
pub use tracker::{CryptoTracker, Dashboard};
pub use types::{
    AlertDirection, CoinDetail, CoinSnapshot, Currency, PriceAlert, PricePoint, PriceSeries, Theme,
};
