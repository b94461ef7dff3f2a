use std::sync::Arc;

use finage_market_data::MarketDataClient;
use finage_tools::{ToolError, ToolSet};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, InitializeRequestParam,
    InitializeResult, JsonObject, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
    ServerCapabilities, ServerInfo, Tool, ToolsCapability,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::Value;
use tracing::info;

/// MCP server exposing the Finage tools.
///
/// Holds no per-session state; rmcp runs each request on its own task.
pub struct FinageServer<C: MarketDataClient> {
    tools: Arc<ToolSet<C>>,
    name: String,
}

impl<C: MarketDataClient> Clone for FinageServer<C> {
    fn clone(&self) -> Self {
        Self {
            tools: self.tools.clone(),
            name: self.name.clone(),
        }
    }
}

impl<C: MarketDataClient + 'static> FinageServer<C> {
    pub fn new(tools: ToolSet<C>, name: impl Into<String>) -> Self {
        Self {
            tools: Arc::new(tools),
            name: name.into(),
        }
    }

    /// Tool listing in registration order.
    pub async fn tools(&self) -> Vec<Tool> {
        self.tools
            .definitions()
            .await
            .into_iter()
            .map(|def| {
                let schema = match def.parameters {
                    Value::Object(schema) => schema,
                    _ => JsonObject::new(),
                };
                Tool::new(def.name, def.description, schema)
            })
            .collect()
    }

    /// Run a tool. Tool failures are returned as `isError` results so the
    /// model sees them; only an unknown tool is a protocol error.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = arguments.map(Value::Object).unwrap_or(Value::Null);
        match self.tools.call(name, arguments).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(ToolError::ToolNotFound(name)) => Err(McpError::invalid_params(
                format!("Unknown tool: {}", name),
                None,
            )),
            Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
        }
    }
}

impl<C: MarketDataClient + 'static> ServerHandler for FinageServer<C> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: self.name.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    /// Answers with the client's protocol version.
    async fn initialize(
        &self,
        request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        info!(
            "Client connected: {} {}",
            request.client_info.name, request.client_info.version
        );
        Ok(InitializeResult {
            protocol_version: request.protocol_version,
            ..self.get_info()
        })
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools().await))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.call(&request.name, request.arguments).await
    }
}
