//! CoinGecko market-data provider implementation

use crate::{
    constants::{
        COINGECKO_API_URL, COINGECKO_COINS_ENDPOINT, COINGECKO_MARKETS_ENDPOINT,
        LISTING_PAGE_SIZE, REQUEST_TIMEOUT_SECS, USER_AGENT,
    },
    error::ProviderError,
    provider::MarketDataProvider,
    types::{CoinDetail, CoinSnapshot, Currency, PricePoint, PriceSeries},
};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// One row of the `/coins/markets` listing response
#[derive(Debug, Deserialize)]
struct MarketRow {
    id: String,
    symbol: String,
    name: String,
    image: String,
    current_price: f64,
    market_cap: f64,
    total_volume: f64,
    price_change_percentage_24h: Option<f64>,
    sparkline_in_7d: Option<Sparkline>,
}

#[derive(Debug, Deserialize)]
struct Sparkline {
    price: Vec<f64>,
}

/// Body of the `/coins/{id}` detail response
#[derive(Debug, Deserialize)]
struct DetailBody {
    id: String,
    symbol: String,
    name: String,
    image: DetailImage,
    #[serde(default)]
    description: DetailDescription,
}

#[derive(Debug, Deserialize)]
struct DetailImage {
    large: String,
}

#[derive(Debug, Default, Deserialize)]
struct DetailDescription {
    #[serde(default)]
    en: String,
}

/// Body of the `/coins/{id}/market_chart` response; each row is a
/// `[unix_millis, price]` pair
#[derive(Debug, Deserialize)]
struct MarketChartBody {
    prices: Vec<(i64, f64)>,
}

/// CoinGecko market-data provider
pub struct CoinGeckoProvider {
    client: Client,
}

impl CoinGeckoProvider {
    /// Creates a new CoinGecko provider
    pub fn new() -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ProviderError::NetworkError)?;

        Ok(Self { client })
    }

    fn listing_url(&self, currency: Currency) -> String {
        format!(
            "{}{}?vs_currency={}&order=market_cap_desc&per_page={}&page=1&sparkline=true&price_change_percentage=24h",
            COINGECKO_API_URL,
            COINGECKO_MARKETS_ENDPOINT,
            currency.vs_currency(),
            LISTING_PAGE_SIZE
        )
    }

    fn detail_url(&self, coin_id: &str) -> String {
        format!(
            "{}{}/{}?localization=false&tickers=false&market_data=false&community_data=false&developer_data=false",
            COINGECKO_API_URL, COINGECKO_COINS_ENDPOINT, coin_id
        )
    }

    fn chart_url(&self, coin_id: &str, currency: Currency, days: u32) -> String {
        format!(
            "{}{}/{}/market_chart?vs_currency={}&days={}",
            COINGECKO_API_URL,
            COINGECKO_COINS_ENDPOINT,
            coin_id,
            currency.vs_currency(),
            days
        )
    }

    /// Issues a GET and decodes the body against an explicit schema
    ///
    /// Malformed JSON is a hard `InvalidResponse` rather than a partially
    /// decoded value.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, ProviderError> {
        tracing::debug!(url, "Fetching from CoinGecko");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout
            } else {
                ProviderError::NetworkError(e)
            }
        })?;

        if response.status().as_u16() == 429 {
            return Err(ProviderError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(ProviderError::ApiError(format!(
                "HTTP {}: {}",
                response.status(),
                response.text().await.unwrap_or_default()
            )));
        }

        let body = response.text().await.map_err(ProviderError::NetworkError)?;

        serde_json::from_str(&body).map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse CoinGecko response: {e}"))
        })
    }
}

impl From<MarketRow> for CoinSnapshot {
    fn from(row: MarketRow) -> Self {
        CoinSnapshot {
            id: row.id,
            name: row.name,
            symbol: row.symbol,
            current_price: row.current_price,
            price_change_24h: row.price_change_percentage_24h,
            market_cap: row.market_cap,
            total_volume: row.total_volume,
            image: row.image,
            sparkline_7d: row.sparkline_in_7d.map(|s| s.price),
        }
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    async fn fetch_listing(&self, currency: Currency) -> Result<Vec<CoinSnapshot>, ProviderError> {
        let rows: Vec<MarketRow> = self.get_json(&self.listing_url(currency)).await?;

        if rows.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "Empty listing returned from CoinGecko".to_string(),
            ));
        }

        tracing::debug!(count = rows.len(), %currency, "Fetched market listing");
        Ok(rows.into_iter().map(CoinSnapshot::from).collect())
    }

    async fn fetch_detail(&self, coin_id: &str) -> Result<CoinDetail, ProviderError> {
        let body: DetailBody = self.get_json(&self.detail_url(coin_id)).await?;

        Ok(CoinDetail {
            id: body.id,
            name: body.name,
            symbol: body.symbol,
            image: body.image.large,
            description: body.description.en,
        })
    }

    async fn fetch_history(
        &self,
        coin_id: &str,
        currency: Currency,
        days: u32,
    ) -> Result<PriceSeries, ProviderError> {
        let body: MarketChartBody = self
            .get_json(&self.chart_url(coin_id, currency, days))
            .await?;

        let mut points = Vec::with_capacity(body.prices.len());
        for (millis, price) in body.prices {
            let timestamp = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
                ProviderError::InvalidResponse(format!("Invalid chart timestamp: {millis}"))
            })?;
            points.push(PricePoint { timestamp, price });
        }

        Ok(PriceSeries {
            coin_id: coin_id.to_string(),
            currency,
            points,
        })
    }

    fn provider_name(&self) -> &'static str {
        "coingecko"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_url_carries_the_dashboard_parameters() {
        let provider = CoinGeckoProvider::new().unwrap();
        let url = provider.listing_url(Currency::EUR);
        assert!(url.contains("vs_currency=eur"));
        assert!(url.contains("order=market_cap_desc"));
        assert!(url.contains("per_page=20"));
        assert!(url.contains("sparkline=true"));
        assert!(url.contains("price_change_percentage=24h"));
    }

    #[test]
    fn detail_url_disables_unused_sections() {
        let provider = CoinGeckoProvider::new().unwrap();
        let url = provider.detail_url("bitcoin");
        assert!(url.contains("/coins/bitcoin?"));
        for section in ["localization", "tickers", "market_data", "community_data", "developer_data"] {
            assert!(url.contains(&format!("{section}=false")), "missing {section}");
        }
    }

    #[test]
    fn market_row_maps_into_snapshot() {
        let row: MarketRow = serde_json::from_value(serde_json::json!({
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://img/btc.png",
            "current_price": 64000.5,
            "market_cap": 1.2e12,
            "total_volume": 3.4e10,
            "price_change_percentage_24h": -1.5,
            "sparkline_in_7d": { "price": [63000.0, 64000.0] }
        }))
        .unwrap();

        let snapshot = CoinSnapshot::from(row);
        assert_eq!(snapshot.id, "bitcoin");
        assert_eq!(snapshot.current_price, 64000.5);
        assert_eq!(snapshot.price_change_24h, Some(-1.5));
        assert_eq!(snapshot.sparkline_7d, Some(vec![63000.0, 64000.0]));
    }

    #[test]
    fn chart_rows_decode_as_pairs() {
        let body: MarketChartBody = serde_json::from_str(
            r#"{"prices": [[1700000000000, 42.5], [1700003600000, 43.0]]}"#,
        )
        .unwrap();
        assert_eq!(body.prices, vec![(1_700_000_000_000, 42.5), (1_700_003_600_000, 43.0)]);
    }

    #[test]
    fn missing_price_field_is_a_parse_error() {
        let result: Result<MarketRow, _> = serde_json::from_value(serde_json::json!({
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://img/btc.png"
        }));
        assert!(result.is_err());
    }
}
