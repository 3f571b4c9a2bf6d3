//! Constants for the crypto price tracker
//!
//! All configuration for the tracker is centralized here. No runtime
//! configuration is used - the system operates transparently with these
//! compile-time constants.

/// How often the listing poll re-fetches the market listing (in seconds)
pub const LISTING_REFRESH_INTERVAL_SECS: u64 = 30;

/// Number of coins per listing page, ordered by descending market cap
pub const LISTING_PAGE_SIZE: u32 = 20;

/// Price history window shown in the detail modal (in days)
pub const HISTORY_WINDOW_DAYS: u32 = 7;

/// How many leading sentences of a coin description the modal shows
pub const DESCRIPTION_SENTENCES: usize = 3;

/// HTTP request timeout when fetching market data (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko endpoint for the market listing
pub const COINGECKO_MARKETS_ENDPOINT: &str = "/coins/markets";

/// CoinGecko endpoint prefix for coin detail and market chart requests
pub const COINGECKO_COINS_ENDPOINT: &str = "/coins";

/// User agent for HTTP requests
pub const USER_AGENT: &str = "crypto-tracker-core/0.1.0";

/// Storage key for the persisted alert list
pub const STORAGE_KEY_ALERTS: &str = "priceAlerts";

/// Storage key for the persisted bookmark set
pub const STORAGE_KEY_BOOKMARKS: &str = "bookmarks";

/// Storage key for the persisted theme flag
pub const STORAGE_KEY_THEME: &str = "theme";
