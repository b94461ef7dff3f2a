//! Market data tools.
//!
//! This module provides tools that implement rig-core's Tool trait:
//! - GetLastStockTool: Latest bid/ask for a US stock
//! - GetAggStockTool: Aggregated OHLCV bars for a US stock
//!
//! Both return JSON text. `ToolSet` groups them and dispatches calls by name.

pub mod agg_stock;
pub mod last_stock;

pub use agg_stock::{GetAggStockArgs, GetAggStockTool};
pub use last_stock::{GetLastStockArgs, GetLastStockTool};

use finage_market_data::MarketDataClient;
use log::warn;
use rig::{completion::ToolDefinition, tool::Tool};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::error::ToolError;

/// Container for all market data tools, simplifying registration with a host.
pub struct ToolSet<C: MarketDataClient> {
    pub last_stock: GetLastStockTool<C>,
    pub agg_stock: GetAggStockTool<C>,
}

impl<C: MarketDataClient + 'static> ToolSet<C> {
    /// Create a tool set sharing one client.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            last_stock: GetLastStockTool::new(client.clone()),
            agg_stock: GetAggStockTool::new(client),
        }
    }

    /// Names of all tools, in registration order.
    pub fn names(&self) -> [&'static str; 2] {
        [GetLastStockTool::<C>::NAME, GetAggStockTool::<C>::NAME]
    }

    /// Definitions of all tools, in registration order.
    pub async fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            self.last_stock.definition(String::new()).await,
            self.agg_stock.definition(String::new()).await,
        ]
    }

    /// Invoke the tool called `name` with JSON `arguments`, returning its JSON text.
    pub async fn call(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<String, ToolError> {
        let result = if name == GetLastStockTool::<C>::NAME {
            self.last_stock.call(parse_args(name, arguments)?).await
        } else if name == GetAggStockTool::<C>::NAME {
            self.agg_stock.call(parse_args(name, arguments)?).await
        } else {
            return Err(ToolError::ToolNotFound(name.to_string()));
        };

        if let Err(ref e) = result {
            warn!("Tool {} failed [{}]: {}", name, e.code(), e);
        }
        result
    }
}

fn parse_args<T: DeserializeOwned>(
    name: &str,
    arguments: serde_json::Value,
) -> Result<T, ToolError> {
    // `arguments` is optional in an MCP tools/call request.
    let arguments = if arguments.is_null() {
        serde_json::json!({})
    } else {
        arguments
    };
    serde_json::from_value(arguments)
        .map_err(|e| ToolError::invalid_input(format!("{}: {}", name, e)))
}
