//! In-memory [`MarketDataClient`] for tool tests.

use async_trait::async_trait;
use finage_market_data::{
    AggregateBar, AggregateQuery, Aggregates, LastQuote, MarketDataClient, MarketDataError,
};
use std::sync::Mutex;

/// The single bar every aggregates call returns, as upstream would send it.
pub fn bar_json() -> serde_json::Value {
    serde_json::json!({"o": 1, "h": 2, "l": 0.5, "c": 1.5, "v": 1000, "t": 1583409600000_i64})
}

pub struct MockClient {
    failure: Option<fn() -> MarketDataError>,
    last_quote_calls: Mutex<Vec<String>>,
    aggregate_calls: Mutex<Vec<AggregateQuery>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            failure: None,
            last_quote_calls: Mutex::new(Vec::new()),
            aggregate_calls: Mutex::new(Vec::new()),
        }
    }

    /// Client whose every call fails with the error built by `failure`.
    pub fn failing(failure: fn() -> MarketDataError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new()
        }
    }

    pub fn last_quote_calls(&self) -> Vec<String> {
        self.last_quote_calls.lock().unwrap().clone()
    }

    pub fn aggregate_calls(&self) -> Vec<AggregateQuery> {
        self.aggregate_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketDataClient for MockClient {
    async fn get_last_quote(&self, symbol: &str) -> Result<LastQuote, MarketDataError> {
        self.last_quote_calls
            .lock()
            .unwrap()
            .push(symbol.to_string());
        if let Some(failure) = self.failure {
            return Err(failure());
        }

        let mut quote: LastQuote = serde_json::from_value(serde_json::json!({
            "symbol": symbol,
            "ask": 175.8,
            "bid": 175.7,
            "asize": 3,
            "bsize": 1,
            "timestamp": 1583409600000_i64
        }))
        .unwrap();
        quote.stamp_date()?;
        Ok(quote)
    }

    async fn get_aggregates(&self, query: &AggregateQuery) -> Result<Aggregates, MarketDataError> {
        self.aggregate_calls.lock().unwrap().push(query.clone());
        if let Some(failure) = self.failure {
            return Err(failure());
        }

        let mut bar: AggregateBar = serde_json::from_value(bar_json()).unwrap();
        bar.stamp_date()?;
        Ok(Aggregates {
            results: vec![bar],
            ..Default::default()
        })
    }
}
