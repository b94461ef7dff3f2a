//! Finage Market Data Crate
//!
//! Read-only access to the Finage REST API for US stocks: the latest quote and
//! aggregated OHLCV bars.
//!
//! # Architecture
//!
//! ```text
//! +------------------+
//! | MarketDataClient |  (FinageClient: one GET per call)
//! +------------------+
//!          |
//!          v
//! +------------------+     +------------------+
//! |    UrlBuilder    | --> | EndpointRegistry |  (name -> path template)
//! +------------------+     +------------------+
//!          |
//!          v
//! +------------------+
//! |  epoch_to_date   |  (epoch ms -> "YYYY-MM-DD HH:MM:SS UTC")
//! +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`FinageConfig`] - Base URL, API key, endpoint table and timeout
//! - [`LastQuote`] - Latest bid/ask snapshot
//! - [`Aggregates`] - OHLCV bars in upstream order
//! - [`MarketDataError`] - Errors, classified by [`ErrorKind`]

pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod timestamp;
pub mod url;

pub use client::{FinageClient, MarketDataClient};
pub use config::{EndpointRegistry, FinageConfig, AGG_STOCK, LAST_STOCK};
pub use errors::{ErrorKind, MarketDataError};
pub use models::{
    AggregateBar, AggregateOptions, AggregateQuery, Aggregates, LastQuote, TIME_SIZES,
};
pub use timestamp::epoch_to_date;
pub use url::UrlBuilder;
