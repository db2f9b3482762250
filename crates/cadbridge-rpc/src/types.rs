//! JSON-RPC 2.0 wire types and the MCP tool vocabulary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RpcError;

/// Incoming JSON-RPC request or notification.
///
/// A missing `id` marks a notification; the server must not answer it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version marker, always `"2.0"`.
    pub jsonrpc: String,
    /// Request identifier; absent on notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Method name (e.g. `tools/call`).
    pub method: String,
    /// Optional parameters object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Outgoing JSON-RPC response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version marker, always `"2.0"`.
    pub jsonrpc: String,
    /// Echoed request identifier (`null` when the request id was unreadable).
    pub id: Value,
    /// Result payload (present on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error payload (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorBody>,
}

/// Structured error body inside a [`JsonRpcResponse`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JsonRpcErrorBody {
    /// Numeric JSON-RPC error code.
    pub code: i64,
    /// Human-readable message.
    pub message: String,
    /// Optional structured details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Build a success response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_owned(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Build an error response from an [`RpcError`].
    pub fn error(id: Value, error: &RpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_owned(),
            id,
            result: None,
            error: Some(error.to_error_body()),
        }
    }
}

// ── MCP tool vocabulary ─────────────────────────────────────────────

/// One entry in the `tools/list` result.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name (e.g. `rhino_create_object`).
    pub name: String,
    /// Human-readable description shown to the model.
    pub description: String,
    /// JSON Schema for the tool's arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Result of a `tools/call` invocation.
///
/// Tool execution failures are reported here with `is_error: true`, not as
/// protocol-level errors; only unknown tool names reject the call itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCallResult {
    /// Content blocks produced by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the tool itself failed.
    #[serde(rename = "isError")]
    pub is_error: bool,
}

/// A single content block in a tool result.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    /// Plain text.
    Text {
        /// The text payload.
        text: String,
    },
}

impl ToolCallResult {
    /// Successful result carrying one text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Failed result carrying one text block describing the failure.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: true,
        }
    }
}
