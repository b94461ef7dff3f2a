//! Mock Finage upstream plus an in-memory stdio session.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use finage_market_data::{FinageClient, FinageConfig};
use finage_mcp_server::mcp::{self, FinageServer};
use finage_tools::ToolSet;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

#[derive(Clone)]
struct Replies {
    last: (StatusCode, Value),
    agg: (StatusCode, Value),
}

/// Upstream serving fixed replies for the last-quote and aggregates paths.
pub async fn start_upstream(last: (StatusCode, Value), agg: (StatusCode, Value)) -> String {
    let app = Router::new()
        .route("/last/stock/{symbol}", get(last_stock))
        .route("/agg/stock/{*rest}", get(agg_stock))
        .with_state(Replies { last, agg });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn last_stock(
    State(replies): State<Replies>,
    Path(_symbol): Path<String>,
) -> (StatusCode, Json<Value>) {
    (replies.last.0, Json(replies.last.1))
}

async fn agg_stock(
    State(replies): State<Replies>,
    Path(_rest): Path<String>,
) -> (StatusCode, Json<Value>) {
    (replies.agg.0, Json(replies.agg.1))
}

pub fn server(base_url: &str, api_key: &str) -> FinageServer<FinageClient> {
    let config = FinageConfig::new(base_url, api_key).unwrap();
    FinageServer::new(ToolSet::new(Arc::new(FinageClient::new(&config))), "finage")
}

/// The MCP handshake every session starts with.
pub fn handshake() -> Vec<Value> {
    vec![
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2025-06-18",
                "capabilities": {},
                "clientInfo": {"name": "test-host", "version": "1.0"}
            }
        }),
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    ]
}

/// Handshake followed by `messages`, one per line.
pub async fn run_session(server: FinageServer<FinageClient>, messages: &[Value]) -> Vec<Value> {
    let mut input = Vec::new();
    for message in handshake().iter().chain(messages) {
        input.extend_from_slice(message.to_string().as_bytes());
        input.push(b'\n');
    }
    run_raw_session(server, &input).await
}

/// Feed `input` as stdin, close it, and collect every stdout line as JSON.
pub async fn run_raw_session(server: FinageServer<FinageClient>, input: &[u8]) -> Vec<Value> {
    let (client, service) = tokio::io::duplex(1 << 20);
    let (mut client_read, mut client_write) = tokio::io::split(client);
    let (service_read, service_write) = tokio::io::split(service);

    client_write.write_all(input).await.unwrap();
    client_write.shutdown().await.unwrap();

    mcp::serve(server, service_read, service_write).await.unwrap();

    let mut output = String::new();
    client_read.read_to_string(&mut output).await.unwrap();
    output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

/// The response whose `id` equals `id`.
pub fn response_for(responses: &[Value], id: i64) -> &Value {
    responses
        .iter()
        .find(|r| r["id"] == id)
        .unwrap_or_else(|| panic!("no response with id {}", id))
}

/// Responses that could not be tied to a request.
pub fn null_id_responses(responses: &[Value]) -> Vec<&Value> {
    responses.iter().filter(|r| r["id"].is_null()).collect()
}
