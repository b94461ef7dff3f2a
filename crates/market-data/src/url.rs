//! Request URL construction.
//!
//! URLs follow the layout the Finage API expects:
//!
//! ```text
//! https://api.finage.co.uk/last/stock/AAPL?apikey=*******
//! https://api.finage.co.uk/agg/stock/AAPL/1/day/2020-02-05/2020-02-07?apikey=*******
//! ```

use crate::config::{EndpointRegistry, FinageConfig};
use crate::errors::MarketDataError;

const REDACTED: &str = "***";

/// Builds authenticated request URLs from the endpoint table.
#[derive(Clone, Debug)]
pub struct UrlBuilder {
    api_base: String,
    api_key: String,
    endpoints: EndpointRegistry,
}

impl UrlBuilder {
    pub fn new(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        endpoints: EndpointRegistry,
    ) -> Self {
        Self {
            api_base: api_base.into(),
            api_key: api_key.into(),
            endpoints,
        }
    }

    pub fn from_config(config: &FinageConfig) -> Self {
        Self::new(
            config.api_base.clone(),
            config.api_key.clone(),
            config.endpoints.clone(),
        )
    }

    /// Build `{base}{template}{segments joined by '/'}?apikey={key}`.
    ///
    /// No separator is inserted before the first segment; the template supplies
    /// it. Segments are not percent-encoded.
    pub fn build(&self, endpoint: &str, segments: &[&str]) -> Result<String, MarketDataError> {
        let template = self.endpoints.resolve(endpoint)?;

        let mut url = String::with_capacity(
            self.api_base.len() + template.len() + self.api_key.len() + 32,
        );
        url.push_str(&self.api_base);
        url.push_str(template);
        url.push_str(&segments.join("/"));
        url.push_str("?apikey=");
        url.push_str(&self.api_key);

        Ok(url)
    }

    /// Replace every occurrence of the API key in `text` with `***`.
    pub fn redact(&self, text: &str) -> String {
        if self.api_key.is_empty() {
            return text.to_string();
        }
        text.replace(&self.api_key, REDACTED)
    }
}
