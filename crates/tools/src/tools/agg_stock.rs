//! Aggregates tool - OHLCV bars for a US stock using rig-core Tool trait.

use finage_market_data::{AggregateOptions, AggregateQuery, MarketDataClient, TIME_SIZES};
use log::debug;
use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ToolError;

/// Arguments for the get_agg_stock tool.
#[derive(Debug, Deserialize)]
pub struct GetAggStockArgs {
    /// Symbol name to retrieve data for.
    pub symbol: String,
    /// Time multiplier.
    pub multiply: i64,
    /// Size of the time: minute, hour, day, week, month, quarter or year.
    pub time_size: String,
    /// Start date.
    pub from_date: String,
    /// End date.
    pub to_date: String,

    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub dbt_filter: Option<bool>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub date_format: Option<String>,
}

impl From<GetAggStockArgs> for AggregateQuery {
    fn from(args: GetAggStockArgs) -> Self {
        AggregateQuery::new(
            args.symbol,
            args.multiply,
            args.time_size,
            args.from_date,
            args.to_date,
        )
        .with_options(AggregateOptions {
            limit: args.limit,
            sort: args.sort,
            dbt_filter: args.dbt_filter,
            start_time: args.start_time,
            end_time: args.end_time,
            date_format: args.date_format,
        })
    }
}

/// Tool to get aggregated OHLCV bars for a US stock.
pub struct GetAggStockTool<C: MarketDataClient> {
    client: Arc<C>,
}

impl<C: MarketDataClient> GetAggStockTool<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C: MarketDataClient> Clone for GetAggStockTool<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<C: MarketDataClient + 'static> Tool for GetAggStockTool<C> {
    const NAME: &'static str = "get_agg_stock";

    type Error = ToolError;
    type Args = GetAggStockArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get OHLCVT info for a US stock. Each entry of `results` has o: Open Price, h: Highest Price, l: Lowest Price, c: Close Price, v: Volume, t: Timestamp, and `date`, the timestamp as a UTC date string.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "symbol": {
                        "type": "string",
                        "description": "Symbol Name to retrieve data for, e.g. AAPL"
                    },
                    "multiply": {
                        "type": "integer",
                        "description": "Time Multiplier"
                    },
                    "time_size": {
                        "type": "string",
                        "description": format!("Size of the time. Options: {}", TIME_SIZES.join(", "))
                    },
                    "from_date": {
                        "type": "string",
                        "description": "Start date, e.g. 2020-02-05"
                    },
                    "to_date": {
                        "type": "string",
                        "description": "End date, e.g. 2020-02-07"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Limit of the results (default 100, maximum 50000)"
                    },
                    "sort": {
                        "type": "string",
                        "description": "Sort results by timestamp: 'asc' (default) or 'desc'"
                    },
                    "dbt_filter": {
                        "type": "boolean",
                        "description": "Daily-based time filter. If true, time filters apply on a daily basis; otherwise they only trim the start and end of the output"
                    },
                    "start_time": {
                        "type": "string",
                        "description": "Start time in UTC, e.g. '17:30'"
                    },
                    "end_time": {
                        "type": "string",
                        "description": "End time in UTC, e.g. '17:45'"
                    },
                    "date_format": {
                        "type": "string",
                        "description": "Date format: 'dt' for datetime or 'ts' for timestamp (default)"
                    }
                },
                "required": ["symbol", "multiply", "time_size", "from_date", "to_date"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let query = AggregateQuery::from(args);
        debug!(
            "get_agg_stock: {} {} {} {}..{}",
            query.symbol, query.multiplier, query.time_size, query.from_date, query.to_date
        );

        let aggregates = self.client.get_aggregates(&query).await?;
        Ok(serde_json::to_string(&aggregates)?)
    }
}
