//! Last stock tool - latest bid/ask for a US stock using rig-core Tool trait.

use finage_market_data::MarketDataClient;
use log::debug;
use rig::{completion::ToolDefinition, tool::Tool};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ToolError;

/// Arguments for the get_last_stock tool.
#[derive(Debug, Deserialize)]
pub struct GetLastStockArgs {
    /// Symbol of a US stock, e.g. AAPL.
    pub symbol: String,
}

/// Tool to get the latest quote for a US stock.
///
/// Output is the upstream quote object, with `date` added, encoded as JSON text.
pub struct GetLastStockTool<C: MarketDataClient> {
    client: Arc<C>,
}

impl<C: MarketDataClient> GetLastStockTool<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C: MarketDataClient> Clone for GetLastStockTool<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<C: MarketDataClient + 'static> Tool for GetLastStockTool<C> {
    const NAME: &'static str = "get_last_stock";

    type Error = ToolError;
    type Args = GetLastStockArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Get Ask, Bid, Ask Size, Bid Size and Timestamp for a US stock. The response also carries `date`, the timestamp as a UTC date string.".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "symbol": {
                        "type": "string",
                        "description": "The symbol of a US stock, e.g. AAPL"
                    }
                },
                "required": ["symbol"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        debug!("get_last_stock: {}", args.symbol);

        let quote = self.client.get_last_quote(&args.symbol).await?;
        Ok(serde_json::to_string(&quote)?)
    }
}
