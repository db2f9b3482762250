//! Newline-delimited JSON-RPC loop over arbitrary byte streams.
//!
//! The MCP transport is stdio: one request per line in, one response per
//! line out, notifications answered with nothing. The loop is generic over
//! reader and writer so tests can drive it through an in-memory duplex.

use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use cadbridge_rpc::{
    JsonRpcRequest, JsonRpcResponse, RpcError, ToolContext, ToolRegistry,
};

/// MCP protocol revision this server implements.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// The stdio-facing MCP server: registry, bridges, and identity.
#[derive(Debug)]
pub struct McpServer {
    name: String,
    registry: ToolRegistry,
    ctx: ToolContext,
}

impl McpServer {
    /// Build a server around a populated registry.
    pub fn new(name: impl Into<String>, registry: ToolRegistry, ctx: ToolContext) -> Self {
        Self {
            name: name.into(),
            registry,
            ctx,
        }
    }

    /// Process one line from the transport. Returns `None` when no response
    /// is owed (notifications and blank lines).
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "unparseable request line");
                let err = RpcError::Parse {
                    message: e.to_string(),
                };
                return Some(JsonRpcResponse::error(Value::Null, &err));
            }
        };
        self.handle_request(request).await
    }

    /// Dispatch one request. Notifications produce no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "notification");
            return None;
        };

        let result = self.dispatch(&request.method, request.params).await;
        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => {
                warn!(method = %request.method, error = %e, "request failed");
                JsonRpcResponse::error(id, &e)
            }
        })
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {"tools": {}},
                "serverInfo": {
                    "name": self.name,
                    "version": env!("CARGO_PKG_VERSION"),
                },
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({"tools": self.registry.descriptors()})),
            "tools/call" => {
                let params = params.unwrap_or(Value::Null);
                let name = params
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| RpcError::InvalidParams {
                        message: "tools/call requires a string 'name'".to_owned(),
                    })?;
                let arguments = params
                    .get("arguments")
                    .cloned()
                    .unwrap_or_else(|| json!({}));
                let result = self.registry.call(name, arguments, &self.ctx).await?;
                serde_json::to_value(result).map_err(|e| RpcError::Internal {
                    message: e.to_string(),
                })
            }
            other => Err(RpcError::MethodNotFound {
                method: other.to_owned(),
            }),
        }
    }

    /// Serve until the reader reaches end of input.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(server = %self.name, tools = self.registry.len(), "serving");
        let mut lines = BufReader::new(reader).lines();
        while let Some(line) = lines.next_line().await? {
            if let Some(response) = self.handle_line(&line).await {
                let mut out = serde_json::to_vec(&response).map_err(std::io::Error::other)?;
                out.push(b'\n');
                writer.write_all(&out).await?;
                writer.flush().await?;
            }
        }
        info!("input closed, shutting down");
        Ok(())
    }
}
