//! Process-wide Finage configuration.
//!
//! Read once at startup, then shared immutably by every request.

mod endpoints;

pub use endpoints::{EndpointRegistry, AGG_STOCK, LAST_STOCK};

use std::time::Duration;

use tracing::warn;

use crate::errors::MarketDataError;

/// Secret appended to every request as the `apikey` query parameter.
pub const ENV_API_KEY: &str = "FINAGE_API_KEY";
/// Base URL prefix, e.g. `https://api.finage.co.uk`.
pub const ENV_API_BASE: &str = "FINAGE_API_BASE";
/// Optional path to a YAML endpoint table replacing the bundled one.
pub const ENV_ENDPOINTS_FILE: &str = "FINAGE_ENDPOINTS_FILE";
/// Optional HTTP timeout in whole seconds.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "FINAGE_HTTP_TIMEOUT_SECS";

/// Default HTTP request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable configuration for [`FinageClient`](crate::FinageClient).
#[derive(Clone, Debug)]
pub struct FinageConfig {
    pub api_base: String,
    pub api_key: String,
    pub endpoints: EndpointRegistry,
    pub timeout: Duration,
}

impl FinageConfig {
    /// Configuration with the bundled endpoint table and default timeout.
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, MarketDataError> {
        Ok(Self {
            api_base: api_base.into(),
            api_key: api_key.into(),
            endpoints: EndpointRegistry::bundled()?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_endpoints(mut self, endpoints: EndpointRegistry) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, MarketDataError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// `FINAGE_API_BASE` is required. A missing or empty `FINAGE_API_KEY` is
    /// allowed: URLs are still built and the upstream rejects the request.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MarketDataError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = lookup(ENV_API_BASE)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                MarketDataError::Configuration(format!("{} is not set", ENV_API_BASE))
            })?;

        let api_key = lookup(ENV_API_KEY).unwrap_or_default();
        if api_key.is_empty() {
            warn!(
                "{} is not set; requests will be sent without a valid API key",
                ENV_API_KEY
            );
        }

        let endpoints = match lookup(ENV_ENDPOINTS_FILE).filter(|v| !v.is_empty()) {
            Some(path) => EndpointRegistry::from_file(path)?,
            None => EndpointRegistry::bundled()?,
        };

        let timeout = match lookup(ENV_HTTP_TIMEOUT_SECS).filter(|v| !v.is_empty()) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    MarketDataError::Configuration(format!(
                        "{} must be a positive whole number of seconds, got '{}'",
                        ENV_HTTP_TIMEOUT_SECS, raw
                    ))
                })?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_base,
            api_key,
            endpoints,
            timeout,
        })
    }
}
