//! Stdio framing around the rmcp service.
//!
//! rmcp reads newline-delimited JSON-RPC and ends the session on the first
//! line it cannot decode. Input is therefore screened here first: lines the
//! service cannot take (invalid UTF-8 or JSON, null ids, unknown methods) are
//! answered directly, and everything else reaches the service over an
//! in-memory pipe. Both reply sources feed one writer task, so stdout lines
//! never interleave.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use finage_market_data::MarketDataClient;
use rmcp::model::{ErrorCode, ErrorData};
use rmcp::ServiceExt;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, Notify};
use tracing::{debug, error, warn};

use super::server::FinageServer;

const PIPE_CAPACITY: usize = 64 * 1024;

/// Client requests the rmcp server can decode.
const REQUEST_METHODS: &[&str] = &[
    "initialize",
    "ping",
    "tools/list",
    "tools/call",
    "resources/list",
    "resources/templates/list",
    "resources/read",
    "resources/subscribe",
    "resources/unsubscribe",
    "prompts/list",
    "prompts/get",
    "completion/complete",
    "logging/setLevel",
];

/// Client notifications the rmcp server can decode.
const NOTIFICATION_METHODS: &[&str] = &[
    "notifications/initialized",
    "notifications/cancelled",
    "notifications/progress",
    "notifications/roots/list_changed",
];

/// Outcome of screening one input line.
#[derive(Debug, PartialEq)]
pub(crate) enum Screened {
    /// Pass to the service. `awaits` is the id of a request that will be
    /// answered; `cancels` is the id a cancellation notification releases.
    Forward {
        awaits: Option<String>,
        cancels: Option<String>,
    },
    /// Answer directly with this message.
    Reply(Value),
    Skip,
}

pub(crate) fn screen(line: &[u8]) -> Screened {
    let line = line.trim_ascii();
    if line.is_empty() {
        return Screened::Skip;
    }

    let message: Value = match serde_json::from_slice(line) {
        Ok(message) => message,
        Err(e) => {
            warn!("Unparsable input line: {}", e);
            return Screened::Reply(error_reply(
                Value::Null,
                ErrorCode::PARSE_ERROR,
                format!("Parse error: {}", e),
            ));
        }
    };

    let Some(object) = message.as_object() else {
        return Screened::Reply(error_reply(
            Value::Null,
            ErrorCode::INVALID_REQUEST,
            "Invalid request: expected a JSON object",
        ));
    };

    // Without a method this is the client's response to a server request.
    let Some(method) = object.get("method") else {
        return Screened::Forward {
            awaits: None,
            cancels: None,
        };
    };
    let Some(method) = method.as_str() else {
        return Screened::Reply(error_reply(
            valid_id(object.get("id")).cloned().unwrap_or(Value::Null),
            ErrorCode::INVALID_REQUEST,
            "Invalid request: method must be a string",
        ));
    };

    match object.get("id") {
        None if NOTIFICATION_METHODS.contains(&method) => Screened::Forward {
            awaits: None,
            cancels: object
                .get("params")
                .and_then(|params| valid_id(params.get("requestId")))
                .map(Value::to_string),
        },
        None => {
            debug!("Ignoring notification {}", method);
            Screened::Skip
        }
        Some(id) => match valid_id(Some(id)) {
            Some(id) if REQUEST_METHODS.contains(&method) => Screened::Forward {
                awaits: Some(id.to_string()),
                cancels: None,
            },
            Some(id) => Screened::Reply(error_reply(
                id.clone(),
                ErrorCode::METHOD_NOT_FOUND,
                format!("Method not found: {}", method),
            )),
            None => Screened::Reply(error_reply(
                Value::Null,
                ErrorCode::INVALID_REQUEST,
                "Invalid request: id must be a string or an integer",
            )),
        },
    }
}

fn valid_id(id: Option<&Value>) -> Option<&Value> {
    id.filter(|id| id.is_string() || id.is_i64() || id.is_u64())
}

fn error_reply(id: Value, code: ErrorCode, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": ErrorData::new(code, message.into(), None),
    })
}

/// Ids of forwarded requests the service has not answered yet.
#[derive(Default)]
struct InFlight {
    ids: Mutex<HashSet<String>>,
    drained: Notify,
}

impl InFlight {
    fn ids(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.ids.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn start(&self, id: String) {
        self.ids().insert(id);
    }

    fn finish(&self, id: &str) {
        let mut ids = self.ids();
        ids.remove(id);
        if ids.is_empty() {
            self.drained.notify_waiters();
        }
    }

    fn abandon(&self) {
        self.ids().clear();
        self.drained.notify_waiters();
    }

    fn is_drained(&self) -> bool {
        self.ids().is_empty()
    }

    async fn wait_drained(&self) {
        loop {
            let notified = self.drained.notified();
            if self.is_drained() {
                return;
            }
            notified.await;
        }
    }
}

/// Serve MCP over the process's stdin and stdout until stdin closes.
pub async fn serve_stdio<C>(server: FinageServer<C>) -> anyhow::Result<()>
where
    C: MarketDataClient + 'static,
{
    serve(server, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Serve MCP, reading requests from `reader` and writing replies to `writer`.
///
/// At end of input (or a read error) every forwarded request is answered
/// before the service is stopped and the writer is flushed and closed.
pub async fn serve<C, R, W>(server: FinageServer<C>, reader: R, writer: W) -> anyhow::Result<()>
where
    C: MarketDataClient + 'static,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel::<String>();
    let writer_task = tokio::spawn(write_lines(rx, writer));

    let (service_side, our_side) = tokio::io::duplex(PIPE_CAPACITY);
    let (service_read, service_write) = tokio::io::split(service_side);
    let (from_service, mut to_service) = tokio::io::split(our_side);

    let service = tokio::spawn(async move {
        let running = server.serve((service_read, service_write)).await?;
        let reason = running.waiting().await?;
        debug!("MCP service stopped: {:?}", reason);
        Ok::<_, anyhow::Error>(())
    });

    let in_flight = Arc::new(InFlight::default());
    let pump = tokio::spawn(forward_replies(from_service, in_flight.clone(), tx.clone()));

    let mut input = BufReader::new(reader);
    let mut line = Vec::new();
    let mut read_error = None;
    loop {
        line.clear();
        match input.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!("Failed to read input: {}", e);
                read_error = Some(e);
                break;
            }
        }

        match screen(&line) {
            Screened::Forward { awaits, cancels } => {
                if let Some(id) = awaits {
                    in_flight.start(id);
                }
                if let Some(id) = cancels {
                    in_flight.finish(&id);
                }
                if !line.ends_with(b"\n") {
                    line.push(b'\n');
                }
                if let Err(e) = to_service.write_all(&line).await {
                    warn!("MCP service stopped reading: {}", e);
                    break;
                }
            }
            Screened::Reply(reply) => {
                if tx.send(reply.to_string()).is_err() {
                    error!("Reply dropped: writer has stopped");
                }
            }
            Screened::Skip => {}
        }
    }

    debug!("Input closed, waiting for in-flight requests");
    in_flight.wait_drained().await;
    if let Err(e) = to_service.shutdown().await {
        debug!("MCP service input already closed: {}", e);
    }

    match service.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!("MCP service ended with error: {:#}", e),
        Err(e) => error!("MCP service task failed: {}", e),
    }
    if let Err(e) = pump.await {
        error!("Reply task failed: {}", e);
    }

    drop(tx);
    writer_task.await??;

    match read_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Copy service output to the writer, marking answered requests done.
async fn forward_replies<R>(
    from_service: R,
    in_flight: Arc<InFlight>,
    tx: mpsc::UnboundedSender<String>,
) where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(from_service).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Some(id) = reply_id(&line) {
                    in_flight.finish(&id);
                }
                if tx.send(line).is_err() {
                    error!("Reply dropped: writer has stopped");
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read MCP service output: {}", e);
                break;
            }
        }
    }
    // Nothing more will be answered.
    in_flight.abandon();
}

/// Id of a response message, in the form `screen` records it.
fn reply_id(line: &str) -> Option<String> {
    let message: Value = serde_json::from_str(line).ok()?;
    if message.get("method").is_some() {
        return None;
    }
    message.get("id").map(Value::to_string)
}

async fn write_lines<W>(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut writer: W,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = rx.recv().await {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    writer.shutdown().await
}
