//! Finage response schemas and request types
//!
//! - `quote` - Latest quote snapshot (LastQuote)
//! - `aggregate` - OHLCV bars and the aggregate request (Aggregates, AggregateQuery)

mod aggregate;
mod quote;

pub(crate) use aggregate::AggregatesResponse;
pub use aggregate::{AggregateBar, AggregateOptions, AggregateQuery, Aggregates, TIME_SIZES};
pub use quote::LastQuote;
