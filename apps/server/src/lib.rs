//! Finage MCP server.
//!
//! Serves the Finage market data tools to an MCP host over stdio, one
//! JSON-RPC 2.0 message per line, using the rmcp SDK.

pub mod config;
pub mod main_lib;
pub mod mcp;

pub use main_lib::{build_state, init_tracing};
