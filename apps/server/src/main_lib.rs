use std::sync::Arc;

use finage_market_data::FinageClient;
use finage_tools::ToolSet;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Config, mcp::FinageServer};

pub const ENV_LOG_FORMAT: &str = "FINAGE_LOG_FORMAT";

/// MCP server over the live Finage client.
pub type AppState = FinageServer<FinageClient>;

/// Install the global subscriber. Output goes to stderr; stdout carries the protocol.
pub fn init_tracing() {
    let log_format = std::env::var(ENV_LOG_FORMAT).unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let client = Arc::new(FinageClient::new(&config.finage));
    tracing::info!(
        "Finage API base: {} ({} endpoints, timeout {:?})",
        config.finage.api_base,
        config.finage.endpoints.len(),
        config.finage.timeout
    );

    let tools = ToolSet::new(client);
    Ok(FinageServer::new(tools, config.server_name.clone()))
}
