//! Provider abstraction for fetching market data from external APIs

use crate::{
    error::ProviderError,
    types::{CoinDetail, CoinSnapshot, Currency, PriceSeries},
};
use async_trait::async_trait;

/// Trait for market-data providers
///
/// Implementations serve the three read paths the dashboard needs: the
/// market listing, per-coin detail, and per-coin price history.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetches the current top coins ordered by descending market cap
    ///
    /// # Arguments
    /// * `currency` - Currency every price field is denominated in
    ///
    /// # Returns
    /// Listing snapshots including 7-day sparkline and 24h change, or an
    /// error if the fetch fails. No retry is performed here; retry is the
    /// poll layer's next scheduled attempt.
    async fn fetch_listing(&self, currency: Currency) -> Result<Vec<CoinSnapshot>, ProviderError>;

    /// Fetches extended detail for a single coin
    async fn fetch_detail(&self, coin_id: &str) -> Result<CoinDetail, ProviderError>;

    /// Fetches a price history series for a single coin
    ///
    /// # Arguments
    /// * `coin_id` - The coin to fetch history for
    /// * `currency` - Currency the prices are denominated in
    /// * `days` - Length of the history window
    async fn fetch_history(
        &self,
        coin_id: &str,
        currency: Currency,
        days: u32,
    ) -> Result<PriceSeries, ProviderError>;

    /// Returns the name of this provider
    fn provider_name(&self) -> &'static str;
}
