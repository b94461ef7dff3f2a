//! Error types and classification for the market data crate.
//!
//! This module provides:
//! - [`MarketDataError`]: The main error enum for all market data operations
//! - [`ErrorKind`]: Coarse classification used by callers to report failures

mod kind;

pub use kind::ErrorKind;

use thiserror::Error;

/// Errors that can occur while building requests to or reading responses from Finage.
///
/// Every variant maps onto an [`ErrorKind`] via [`kind`](Self::kind). Messages never
/// carry the API key: anything that could contain a request URL is redacted before
/// it is stored in the error.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// Process configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The endpoint name is not present in the endpoint table.
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// Transport failure, non-2xx status, or an unparsable body.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The response body parsed but lacks a field this crate depends on.
    #[error("Malformed response: missing field `{field}`")]
    MissingField {
        /// Path of the missing field (e.g. `timestamp`, `results[].t`)
        field: &'static str,
    },

    /// An epoch timestamp could not be represented as a calendar date.
    #[error("Timestamp out of range: {0}")]
    InvalidTimestamp(i64),
}

impl MarketDataError {
    /// Returns the classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use finage_market_data::errors::{ErrorKind, MarketDataError};
    ///
    /// let error = MarketDataError::UnknownEndpoint("nonexistent".to_string());
    /// assert_eq!(error.kind(), ErrorKind::Configuration);
    ///
    /// let error = MarketDataError::MissingField { field: "timestamp" };
    /// assert_eq!(error.kind(), ErrorKind::Upstream);
    /// ```
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) | Self::UnknownEndpoint(_) => ErrorKind::Configuration,

            Self::RateLimited { .. }
            | Self::Timeout { .. }
            | Self::ProviderError { .. }
            | Self::MissingField { .. }
            | Self::InvalidTimestamp(_) => ErrorKind::Upstream,
        }
    }

    pub(crate) fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}
