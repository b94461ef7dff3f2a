//! Model Context Protocol over stdio, served with the rmcp SDK.
//!
//! - `server`: `FinageServer`, the rmcp `ServerHandler` over the tool set
//! - `transport`: stdin screening and the single stdout writer around the service

pub mod server;
pub mod transport;

pub use server::FinageServer;
pub use transport::{serve, serve_stdio};
