//! Finage REST client.
//!
//! Two read-only operations:
//! - Latest quote via `/last/stock/{symbol}`
//! - OHLCV bars via `/agg/stock/{symbol}/{multiply}/{time_size}/{from}/{to}`
//!
//! Every call issues exactly one GET. Nothing is retried or cached.
//! API documentation: https://finage.co.uk/docs/api

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::{FinageConfig, AGG_STOCK, LAST_STOCK};
use crate::errors::MarketDataError;
use crate::models::{AggregateQuery, Aggregates, AggregatesResponse, LastQuote};
use crate::url::UrlBuilder;

const PROVIDER_ID: &str = "FINAGE";

/// Error body returned by Finage on failures
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<String>,
    message: Option<String>,
}

/// Read-only market data operations exposed to the tool layer.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    /// Latest bid/ask for `symbol`, with `date` derived from `timestamp`.
    async fn get_last_quote(&self, symbol: &str) -> Result<LastQuote, MarketDataError>;

    /// OHLCV bars for the query, each with `date` derived from `t`.
    async fn get_aggregates(&self, query: &AggregateQuery) -> Result<Aggregates, MarketDataError>;
}

/// reqwest-backed [`MarketDataClient`] for the Finage API.
pub struct FinageClient {
    client: Client,
    urls: UrlBuilder,
}

impl FinageClient {
    pub fn new(config: &FinageConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            urls: UrlBuilder::from_config(config),
        }
    }

    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    /// GET `url` and decode the JSON body as `T`.
    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, MarketDataError> {
        debug!("Finage request: {}", self.urls.redact(url));

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                let message = self.urls.redact(&e.without_url().to_string());
                MarketDataError::provider(PROVIDER_ID, format!("Request failed: {}", message))
            }
        })?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(MarketDataError::provider(
                PROVIDER_ID,
                "Invalid or missing API key",
            ));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if let Ok(error_resp) = serde_json::from_str::<ErrorResponse>(&body) {
                if let Some(error_msg) = error_resp.error.or(error_resp.message) {
                    return Err(MarketDataError::provider(
                        PROVIDER_ID,
                        format!("HTTP {} - {}", status, self.urls.redact(&error_msg)),
                    ));
                }
            }

            return Err(MarketDataError::provider(
                PROVIDER_ID,
                format!("HTTP {} - {}", status, self.urls.redact(body.trim())),
            ));
        }

        let text = response.text().await.map_err(|e| {
            MarketDataError::provider(
                PROVIDER_ID,
                format!("Failed to read response: {}", e.without_url()),
            )
        })?;

        serde_json::from_str(&text).map_err(|e| {
            MarketDataError::provider(PROVIDER_ID, format!("Failed to parse response: {}", e))
        })
    }
}

#[async_trait]
impl MarketDataClient for FinageClient {
    async fn get_last_quote(&self, symbol: &str) -> Result<LastQuote, MarketDataError> {
        let url = self.urls.build(LAST_STOCK, &[symbol])?;

        debug!("Fetching latest quote for {} from Finage", symbol);

        let mut quote: LastQuote = self.fetch(&url).await?;
        quote.stamp_date()?;
        Ok(quote)
    }

    async fn get_aggregates(&self, query: &AggregateQuery) -> Result<Aggregates, MarketDataError> {
        if !query.options.is_empty() {
            // Not forwarded until the upstream parameter names are confirmed.
            debug!(
                "Ignoring aggregate options for {}: {:?}",
                query.symbol, query.options
            );
        }

        let multiplier = query.multiplier.to_string();
        let url = self.urls.build(
            AGG_STOCK,
            &[
                query.symbol.as_str(),
                multiplier.as_str(),
                query.time_size.as_str(),
                query.from_date.as_str(),
                query.to_date.as_str(),
            ],
        )?;

        debug!(
            "Fetching {} {} bars for {} from {} to {} from Finage",
            query.multiplier, query.time_size, query.symbol, query.from_date, query.to_date
        );

        let response: AggregatesResponse = self.fetch(&url).await?;
        let aggregates = Aggregates::try_from(response)?;

        debug!(
            "Finage: fetched {} bars for {}",
            aggregates.results.len(),
            query.symbol
        );

        Ok(aggregates)
    }
}
