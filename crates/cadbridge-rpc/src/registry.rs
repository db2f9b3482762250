//! Tool handler trait and registry.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::context::ToolContext;
use crate::errors::RpcError;
use crate::types::{ToolCallResult, ToolDescriptor};

/// One MCP tool: its metadata plus the async call implementation.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Tool name as listed to clients.
    fn name(&self) -> &'static str;

    /// Description shown to the model.
    fn description(&self) -> &'static str;

    /// JSON Schema for the tool's arguments.
    fn input_schema(&self) -> Value;

    /// Execute the tool. Returns rendered text on success; errors are
    /// reported to the caller inside the tool result, not as protocol
    /// failures.
    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError>;
}

/// Name-keyed collection of tool handlers.
#[derive(Default)]
pub struct ToolRegistry {
    handlers: HashMap<&'static str, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its own name. Re-registering a name replaces
    /// the previous handler.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) {
        let _ = self.handlers.insert(handler.name(), handler);
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Whether a tool with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Descriptors for every registered tool, sorted by name.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        let mut descriptors: Vec<ToolDescriptor> = self
            .handlers
            .values()
            .map(|h| ToolDescriptor {
                name: h.name().to_owned(),
                description: h.description().to_owned(),
                input_schema: h.input_schema(),
            })
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Invoke a tool by name.
    ///
    /// An unknown name is a protocol error. A known tool that fails comes
    /// back as a successful call whose result has `is_error` set, so the
    /// model sees the failure text.
    pub async fn call(
        &self,
        name: &str,
        args: Value,
        ctx: &ToolContext,
    ) -> Result<ToolCallResult, RpcError> {
        let handler = self
            .handlers
            .get(name)
            .ok_or_else(|| RpcError::MethodNotFound {
                method: name.to_owned(),
            })?;

        debug!(tool = name, "calling tool");
        match handler.call(args, ctx).await {
            Ok(text) => Ok(ToolCallResult::text(text)),
            Err(e) => {
                warn!(tool = name, error = %e, "tool call failed");
                Ok(ToolCallResult::error(e.to_string()))
            }
        }
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.handlers.len())
            .finish()
    }
}
