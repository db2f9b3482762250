//! Tool handlers, grouped by target platform.

use std::sync::Arc;

use serde_json::Value;

use crate::errors::RpcError;
use crate::registry::ToolRegistry;

pub mod grasshopper;
pub mod rhino;
pub mod status;

/// Register every tool handler into the registry.
pub fn register_all(registry: &mut ToolRegistry) {
    // Rhino
    registry.register(Arc::new(rhino::CreateObjectHandler));
    registry.register(Arc::new(rhino::GetDocumentInfoHandler));
    registry.register(Arc::new(rhino::GetObjectInfoHandler));
    registry.register(Arc::new(rhino::ModifyObjectHandler));
    registry.register(Arc::new(rhino::DeleteObjectHandler));
    registry.register(Arc::new(rhino::SelectObjectsHandler));
    registry.register(Arc::new(rhino::ExecuteScriptHandler));
    registry.register(Arc::new(rhino::CreateLayerHandler));
    registry.register(Arc::new(rhino::CurrentLayerHandler));

    // Grasshopper
    registry.register(Arc::new(grasshopper::AddComponentHandler));
    registry.register(Arc::new(grasshopper::ConnectComponentsHandler));
    registry.register(Arc::new(grasshopper::GetDocumentInfoHandler));
    registry.register(Arc::new(grasshopper::GetAllComponentsHandler));
    registry.register(Arc::new(grasshopper::GetComponentInfoHandler));
    registry.register(Arc::new(grasshopper::GetConnectionsHandler));
    registry.register(Arc::new(grasshopper::CreatePatternHandler));
    registry.register(Arc::new(grasshopper::GetAvailablePatternsHandler));
    registry.register(Arc::new(grasshopper::SearchComponentsHandler));
    registry.register(Arc::new(grasshopper::GetComponentParametersHandler));
    registry.register(Arc::new(grasshopper::ValidateConnectionHandler));
    registry.register(Arc::new(grasshopper::ClearDocumentHandler));
    registry.register(Arc::new(grasshopper::SaveDocumentHandler));
    registry.register(Arc::new(grasshopper::LoadDocumentHandler));

    // Status
    registry.register(Arc::new(status::BridgeStatusHandler));
}

// ── Argument extraction helpers ─────────────────────────────────────

/// Required string argument.
pub(crate) fn require_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, RpcError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| RpcError::InvalidParams {
            message: format!("missing required string argument: {key}"),
        })
}

/// Required number argument.
pub(crate) fn require_f64(args: &Value, key: &str) -> Result<f64, RpcError> {
    args.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| RpcError::InvalidParams {
            message: format!("missing required number argument: {key}"),
        })
}

/// Optional string argument.
pub(crate) fn optional_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

/// Optional integer argument.
pub(crate) fn optional_i64(args: &Value, key: &str) -> Option<i64> {
    args.get(key).and_then(Value::as_i64)
}

/// Object-valued argument, defaulting to an empty object when absent.
pub(crate) fn object_arg(args: &Value, key: &str) -> Value {
    match args.get(key) {
        Some(v @ Value::Object(_)) => v.clone(),
        _ => Value::Object(serde_json::Map::new()),
    }
}

/// Render a command result as text content.
pub(crate) fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
