use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::errors::MarketDataError;
use crate::timestamp::epoch_to_date;

/// Latest bid/ask snapshot from `/last/stock/{symbol}`.
///
/// Fields not modelled here are kept in `extra` and written back unchanged.
/// Modelled fields are `Option<Option<_>>`: `None` when upstream omitted the
/// field, `Some(None)` when it sent `null`. Numbers keep their upstream form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LastQuote {
    #[serde(default, with = "::serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub symbol: Option<Option<String>>,

    /// Ask price
    #[serde(default, with = "::serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub ask: Option<Option<Number>>,

    /// Bid price
    #[serde(default, with = "::serde_with::rust::double_option", skip_serializing_if = "Option::is_none")]
    pub bid: Option<Option<Number>>,

    /// Ask size
    #[serde(
        rename = "asize",
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub ask_size: Option<Option<Number>>,

    /// Bid size
    #[serde(
        rename = "bsize",
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub bid_size: Option<Option<Number>>,

    /// Quote time in epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,

    /// `timestamp` rendered as a UTC date string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl LastQuote {
    /// Set `date` from `timestamp`.
    pub fn stamp_date(&mut self) -> Result<(), MarketDataError> {
        let timestamp = self
            .timestamp
            .ok_or(MarketDataError::MissingField { field: "timestamp" })?;
        let date =
            epoch_to_date(timestamp).ok_or(MarketDataError::InvalidTimestamp(timestamp))?;
        self.date = Some(date);
        Ok(())
    }
}
