use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::errors::MarketDataError;
use crate::timestamp::epoch_to_date;

/// Bar sizes accepted by the aggregates endpoint. Listed for documentation;
/// the upstream API is the one that validates them.
pub const TIME_SIZES: &[&str] = &["minute", "hour", "day", "week", "month", "quarter", "year"];

/// Optional aggregate parameters.
///
/// These are accepted for discoverability but are not yet sent upstream: the
/// query-parameter names have not been confirmed against the Finage API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOptions {
    /// Result limit (upstream default 100, max 50000)
    pub limit: Option<i64>,
    /// Sort by timestamp, `asc` or `desc`
    pub sort: Option<String>,
    /// Apply the time window on a daily basis
    pub dbt_filter: Option<bool>,
    /// Start time of day in UTC, e.g. `17:30`
    pub start_time: Option<String>,
    /// End time of day in UTC, e.g. `17:45`
    pub end_time: Option<String>,
    /// `dt` for datetime or `ts` for timestamp
    pub date_format: Option<String>,
}

impl AggregateOptions {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Request for `/agg/stock/{symbol}/{multiply}/{time_size}/{from}/{to}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateQuery {
    pub symbol: String,
    pub multiplier: i64,
    pub time_size: String,
    pub from_date: String,
    pub to_date: String,
    pub options: AggregateOptions,
}

impl AggregateQuery {
    pub fn new(
        symbol: impl Into<String>,
        multiplier: i64,
        time_size: impl Into<String>,
        from_date: impl Into<String>,
        to_date: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            multiplier,
            time_size: time_size.into(),
            from_date: from_date.into(),
            to_date: to_date.into(),
            options: AggregateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AggregateOptions) -> Self {
        self.options = options;
        self
    }
}

/// One OHLCV bar.
///
/// Same field conventions as [`LastQuote`](crate::LastQuote): an absent field
/// stays absent, `null` stays `null` and numbers are not re-encoded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateBar {
    /// Open price
    #[serde(default, with = "::serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub o: Option<Option<Number>>,
    /// High price
    #[serde(default, with = "::serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub h: Option<Option<Number>>,
    /// Low price
    #[serde(default, with = "::serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub l: Option<Option<Number>>,
    /// Close price
    #[serde(default, with = "::serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub c: Option<Option<Number>>,
    /// Volume
    #[serde(default, with = "::serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub v: Option<Option<Number>>,
    /// Bar start in epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<i64>,
    /// `t` rendered as a UTC date string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AggregateBar {
    /// Set `date` from `t`.
    pub fn stamp_date(&mut self) -> Result<(), MarketDataError> {
        let t = self
            .t
            .ok_or(MarketDataError::MissingField { field: "results[].t" })?;
        self.date = Some(epoch_to_date(t).ok_or(MarketDataError::InvalidTimestamp(t))?);
        Ok(())
    }
}

/// Aggregates response. `results` keeps upstream order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    pub results: Vec<AggregateBar>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw body, before `results` is known to be present.
#[derive(Debug, Deserialize)]
pub(crate) struct AggregatesResponse {
    #[serde(default)]
    results: Option<Vec<AggregateBar>>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<AggregatesResponse> for Aggregates {
    type Error = MarketDataError;

    fn try_from(response: AggregatesResponse) -> Result<Self, Self::Error> {
        let mut results = response
            .results
            .ok_or(MarketDataError::MissingField { field: "results" })?;
        for bar in results.iter_mut() {
            bar.stamp_date()?;
        }
        Ok(Self {
            results,
            extra: response.extra,
        })
    }
}
