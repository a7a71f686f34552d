// MCP server: JSON-RPC 2.0 over newline-delimited stdio

use crate::error::ToolError;
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolsCapability,
    PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, error, info, warn};

pub struct McpServer {
    registry: Arc<ToolRegistry>,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            info: ServerInfo::default(),
        }
    }

    /// Serve on the process's stdin/stdout until EOF or `shutdown` resolves.
    pub async fn start<F>(&self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        info!("{} running on stdio", self.info.name);
        self.serve(tokio::io::stdin(), tokio::io::stdout(), shutdown)
            .await
    }

    /// Serve requests read from `reader`, writing responses to `writer`.
    ///
    /// Requests are handled one at a time in arrival order. The loop ends when
    /// the reader reaches EOF or `shutdown` resolves; the writer is then
    /// flushed and closed. A request in flight when `shutdown` fires is
    /// finished first.
    pub async fn serve<R, W, F>(&self, reader: R, writer: W, shutdown: F) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
        F: Future<Output = ()>,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new());
        let mut sink = FramedWrite::new(writer, LinesCodec::new());
        tokio::pin!(shutdown);

        loop {
            let line = tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, closing transport");
                    break;
                }
                next = lines.next() => match next {
                    Some(Ok(line)) => line,
                    Some(Err(e)) => {
                        error!(error = %e, "Failed to read from transport");
                        return Err(e).context("Failed to read from transport");
                    }
                    None => {
                        info!("Transport closed by peer");
                        break;
                    }
                },
            };

            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let frame = serde_json::to_string(&response).context("Failed to encode response")?;
                sink.send(frame).await.context("Failed to write response")?;
            }
        }

        SinkExt::<String>::close(&mut sink)
            .await
            .context("Failed to close transport")?;
        Ok(())
    }

    /// Handle one raw frame. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Received unparseable frame");
                return Some(JsonRpcResponse::error(
                    serde_json::Value::Null,
                    JsonRpcError::parse_error(),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(serde_json::Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                warn!(error = %e, "Received malformed request");
                Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request()))
            }
        }
    }

    /// Handle a decoded request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "Received notification");
            return None;
        };

        debug!(method = %request.method, id = %id, "Handling request");

        let outcome = match request.method.as_str() {
            "initialize" => self.initialize(request.params).map(to_value),
            "ping" => Ok(Ok(serde_json::json!({}))),
            "tools/list" => Ok(to_value(ListToolsResult {
                tools: self.registry.list_schemas(),
            })),
            "tools/call" => self.call_tool(request.params).await.map(to_value),
            other => Err(JsonRpcError::method_not_found(other)),
        };

        let response = match outcome {
            Ok(Ok(result)) => JsonRpcResponse::success(id, result),
            Ok(Err(e)) => {
                error!(error = %e, "Failed to encode result");
                JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string()))
            }
            Err(e) => JsonRpcResponse::error(id, e),
        };

        Some(response)
    }

    fn initialize(&self, params: Option<serde_json::Value>) -> Result<InitializeResult, JsonRpcError> {
        match params.map(serde_json::from_value::<InitializeParams>) {
            Some(Ok(params)) => {
                let client = params
                    .client_info
                    .map(|c| format!("{} {}", c.name, c.version))
                    .unwrap_or_else(|| "unknown client".to_string());
                info!(client = %client, protocol = %params.protocol_version, "Client initialized");
            }
            Some(Err(e)) => warn!(error = %e, "Ignoring malformed initialize params"),
            None => {}
        }

        Ok(InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: self.info.clone(),
        })
    }

    async fn call_tool(
        &self,
        params: Option<serde_json::Value>,
    ) -> Result<CallToolResult, JsonRpcError> {
        let params: CallToolParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid tool call parameters: {}", e)))?
            .ok_or_else(|| JsonRpcError::invalid_params("Missing tool call parameters"))?;

        debug!(tool = %params.name, "Calling tool");

        match self.registry.call(&params.name, params.arguments).await {
            Ok(result) => Ok(result),
            Err(e) => {
                let rpc_error = e.to_rpc_error();
                match e {
                    ToolError::Unexpected(_) => {
                        error!(tool = %params.name, error = %rpc_error.message, "[MCP Error] tool failed")
                    }
                    _ => debug!(tool = %params.name, error = %rpc_error.message, "Rejected tool call"),
                }
                Err(rpc_error)
            }
        }
    }
}

fn to_value<T: Serialize>(result: T) -> serde_json::Result<serde_json::Value> {
    serde_json::to_value(result)
}
