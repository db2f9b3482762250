//! MCP tool surface for the CAD bridges.
//!
//! This crate defines the JSON-RPC 2.0 wire types the server speaks, the
//! [`ToolHandler`] trait and [`ToolRegistry`] that dispatch tool calls, and
//! the handlers that translate each tool into a bridge command. Handlers are
//! thin: they pull arguments out of the call, invoke a façade method on
//! [`ToolContext`], and render the result as text content.

#![deny(unsafe_code)]

pub mod context;
pub mod errors;
pub mod handlers;
pub mod registry;
pub mod types;

pub use context::ToolContext;
pub use errors::RpcError;
pub use registry::{ToolHandler, ToolRegistry};
pub use types::{
    JsonRpcErrorBody, JsonRpcRequest, JsonRpcResponse, ToolCallResult, ToolContent, ToolDescriptor,
};
