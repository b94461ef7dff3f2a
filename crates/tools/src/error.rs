//! Tool error types.

use finage_market_data::{ErrorKind, MarketDataError};
use thiserror::Error;

/// Errors surfaced as a failed tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments did not match the tool's parameter schema.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Tool not found in the tool set.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// The market data call failed.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// The result could not be encoded as JSON text.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ToolError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Error code for programmatic handling by the host.
    pub fn code(&self) -> &'static str {
        match self {
            ToolError::InvalidInput(_) => "INVALID_INPUT",
            ToolError::ToolNotFound(_) => "TOOL_NOT_FOUND",
            ToolError::MarketData(e) => e.kind().as_str(),
            ToolError::Serialization(_) => ErrorKind::Serialization.as_str(),
        }
    }
}
