//! Types for the crypto price tracker

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display currencies supported by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar
    USD,
    /// Euro
    EUR,
    /// Indian rupee
    INR,
}

impl Currency {
    /// Get the currency code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::INR => "INR",
        }
    }

    /// Get the `vs_currency` parameter value for CoinGecko requests
    pub fn vs_currency(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::INR => "inr",
        }
    }

    /// Get the display symbol for this currency
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::INR => "₹",
        }
    }

    /// Get all supported currencies
    pub fn all() -> &'static [Currency] {
        &[Currency::USD, Currency::EUR, Currency::INR]
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One listing entry as returned by a market-data provider
///
/// Snapshots are immutable per fetch and replaced wholesale on every poll;
/// there is no field-level merging of listing data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinSnapshot {
    /// Upstream-assigned stable identifier (e.g. "bitcoin")
    pub id: String,

    /// Display name (e.g. "Bitcoin")
    pub name: String,

    /// Ticker symbol, lowercase as delivered upstream (e.g. "btc")
    pub symbol: String,

    /// Current price in the currency the listing was fetched with
    pub current_price: f64,

    /// 24h price change percentage, absent for thinly traded coins
    pub price_change_24h: Option<f64>,

    /// Market capitalization in the listing currency
    pub market_cap: f64,

    /// 24h trading volume in the listing currency
    pub total_volume: f64,

    /// Icon URL
    pub image: String,

    /// 7-day sparkline price samples, oldest first
    pub sparkline_7d: Option<Vec<f64>>,
}

/// Extended coin information fetched on demand for the detail modal
///
/// Held separately from listing snapshots, keyed by coin id, and never
/// merged back into them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinDetail {
    /// Upstream-assigned stable identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Ticker symbol
    pub symbol: String,

    /// Icon URL
    pub image: String,

    /// Long-form English description, may be empty
    pub description: String,
}

/// One sample in a price history series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Sample timestamp
    pub timestamp: DateTime<Utc>,

    /// Price at the sample timestamp
    pub price: f64,
}

/// Price history for one coin over a fixed window, in one currency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    /// Coin the series belongs to
    pub coin_id: String,

    /// Currency every price in the series is denominated in
    pub currency: Currency,

    /// Samples in ascending timestamp order
    pub points: Vec<PricePoint>,
}

/// Direction a price alert watches for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertDirection {
    /// Fires presentationally when the price is above the target
    Above,
    /// Fires presentationally when the price is below the target
    Below,
}

impl AlertDirection {
    /// Get the arrow glyph the alert panel renders for this direction
    pub fn arrow(&self) -> &'static str {
        match self {
            AlertDirection::Above => "↑",
            AlertDirection::Below => "↓",
        }
    }
}

/// A user-defined price threshold
///
/// Created by user action and never mutated afterwards; removed only by an
/// explicit dismissal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    /// Locally generated unique identifier
    pub id: Uuid,

    /// Coin the alert targets
    pub coin_id: String,

    /// Threshold price in the currency active at creation time
    pub target_price: f64,

    /// Which side of the threshold the alert watches
    pub direction: AlertDirection,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl PriceAlert {
    /// Creates a new alert with a fresh id and the current timestamp
    pub fn new(coin_id: impl Into<String>, target_price: f64, direction: AlertDirection) -> Self {
        Self {
            id: Uuid::new_v4(),
            coin_id: coin_id.into(),
            target_price,
            direction,
            created_at: Utc::now(),
        }
    }
}

/// Presentation theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Storage encoding, matching the `"dark"` / `"light"` values the
    /// dashboard persists
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Decode a stored theme value
    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    /// The opposite theme
    pub fn toggled(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_api_parameters_are_lowercase_codes() {
        for currency in Currency::all() {
            assert_eq!(currency.vs_currency(), currency.code().to_lowercase());
        }
    }

    #[test]
    fn alert_ids_are_unique_per_creation() {
        let a = PriceAlert::new("bitcoin", 50_000.0, AlertDirection::Above);
        let b = PriceAlert::new("bitcoin", 50_000.0, AlertDirection::Above);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn theme_toggle_round_trips() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_eq!(Theme::from_str_opt("dark"), Some(Theme::Dark));
        assert_eq!(Theme::from_str_opt("sepia"), None);
    }
}
