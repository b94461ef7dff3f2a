//! Finage tools - market data exposed as model-callable tools.
//!
//! Tools implement rig-core's `Tool` trait so their names, descriptions and
//! JSON parameter schemas can be advertised to any tool-calling host.
//!
//! # Architecture
//!
//! - `tools`: `get_last_stock`, `get_agg_stock` and the `ToolSet` dispatcher
//! - `error`: `ToolError` with stable error codes
//!
//! # Example
//!
//! ```ignore
//! use finage_market_data::{FinageClient, FinageConfig};
//! use finage_tools::ToolSet;
//!
//! let client = Arc::new(FinageClient::new(&FinageConfig::from_env()?));
//! let tools = ToolSet::new(client);
//!
//! let json = tools
//!     .call("get_last_stock", serde_json::json!({ "symbol": "AAPL" }))
//!     .await?;
//! ```

pub mod error;
pub mod tools;

#[cfg(test)]
mod test_client;

pub use error::ToolError;
pub use tools::{
    GetAggStockArgs, GetAggStockTool, GetLastStockArgs, GetLastStockTool, ToolSet,
};

// Re-export rig's tool types so hosts don't need a direct dependency.
pub use rig::completion::ToolDefinition;
pub use rig::tool::Tool;
