//! Error types for the crypto price tracker

use thiserror::Error;

/// Errors that can occur when fetching market data from a provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network request failed
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response did not match the expected schema
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Provider API error
    #[error("Provider API error: {0}")]
    ApiError(String),

    /// Timeout waiting for response
    #[error("Request timeout")]
    Timeout,
}

/// Errors that can occur when reading or writing persisted state
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying key-value read or write failed
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be decoded
    #[error("Corrupt value under key '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

impl StorageError {
    /// Creates a Corrupt error
    pub fn corrupt(key: &str, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
