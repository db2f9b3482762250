//! Tool handlers targeting the Grasshopper canvas host.

use async_trait::async_trait;
use serde_json::{Value, json};

use cadbridge_bridge::ConnectOptions;

use crate::context::ToolContext;
use crate::errors::RpcError;
use crate::handlers::{optional_i64, optional_str, render, require_f64, require_str};
use crate::registry::ToolHandler;

fn connect_options(args: &Value) -> ConnectOptions {
    ConnectOptions {
        source_param: optional_str(args, "source_param").map(str::to_owned),
        source_param_index: optional_i64(args, "source_param_index"),
        target_param: optional_str(args, "target_param").map(str::to_owned),
        target_param_index: optional_i64(args, "target_param_index"),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

/// `grasshopper_add_component`
pub struct AddComponentHandler;

#[async_trait]
impl ToolHandler for AddComponentHandler {
    fn name(&self) -> &'static str {
        "grasshopper_add_component"
    }

    fn description(&self) -> &'static str {
        "Add a component to the Grasshopper canvas at the given position."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "type": {"type": "string", "description": "Component type, e.g. slider, circle, panel"},
                "x": {"type": "number"},
                "y": {"type": "number"}
            },
            "required": ["type", "x", "y"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let component_type = require_str(&args, "type")?;
        let x = require_f64(&args, "x")?;
        let y = require_f64(&args, "y")?;
        let result = ctx.grasshopper.add_component(component_type, x, y).await?;
        Ok(render(&result))
    }
}

/// `grasshopper_connect_components`
pub struct ConnectComponentsHandler;

#[async_trait]
impl ToolHandler for ConnectComponentsHandler {
    fn name(&self) -> &'static str {
        "grasshopper_connect_components"
    }

    fn description(&self) -> &'static str {
        "Wire an output of one component to an input of another. Parameters \
         can be addressed by name or by index; a name takes precedence."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "source_id": {"type": "string"},
                "target_id": {"type": "string"},
                "source_param": {"type": "string"},
                "source_param_index": {"type": "integer"},
                "target_param": {"type": "string"},
                "target_param_index": {"type": "integer"}
            },
            "required": ["source_id", "target_id"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let source_id = require_str(&args, "source_id")?;
        let target_id = require_str(&args, "target_id")?;
        let options = connect_options(&args);
        let result = ctx
            .grasshopper
            .connect_components(source_id, target_id, options)
            .await?;
        Ok(render(&result))
    }
}

/// `grasshopper_get_document_info`
pub struct GetDocumentInfoHandler;

#[async_trait]
impl ToolHandler for GetDocumentInfoHandler {
    fn name(&self) -> &'static str {
        "grasshopper_get_document_info"
    }

    fn description(&self) -> &'static str {
        "Fetch information about the active Grasshopper document."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn call(&self, _args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let result = ctx.grasshopper.get_document_info().await?;
        Ok(render(&result))
    }
}

/// `grasshopper_get_all_components`
pub struct GetAllComponentsHandler;

#[async_trait]
impl ToolHandler for GetAllComponentsHandler {
    fn name(&self) -> &'static str {
        "grasshopper_get_all_components"
    }

    fn description(&self) -> &'static str {
        "List every component on the canvas with its identifier and position."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn call(&self, _args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let result = ctx.grasshopper.get_all_components().await?;
        Ok(render(&result))
    }
}

/// `grasshopper_get_component_info`
pub struct GetComponentInfoHandler;

#[async_trait]
impl ToolHandler for GetComponentInfoHandler {
    fn name(&self) -> &'static str {
        "grasshopper_get_component_info"
    }

    fn description(&self) -> &'static str {
        "Fetch one component's type, parameters, and current values."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"component_id": {"type": "string"}},
            "required": ["component_id"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let component_id = require_str(&args, "component_id")?;
        let result = ctx.grasshopper.get_component_info(component_id).await?;
        Ok(render(&result))
    }
}

/// `grasshopper_get_connections`
pub struct GetConnectionsHandler;

#[async_trait]
impl ToolHandler for GetConnectionsHandler {
    fn name(&self) -> &'static str {
        "grasshopper_get_connections"
    }

    fn description(&self) -> &'static str {
        "List every wire between components on the canvas."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn call(&self, _args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let result = ctx.grasshopper.get_connections().await?;
        Ok(render(&result))
    }
}

/// `grasshopper_create_pattern`
pub struct CreatePatternHandler;

#[async_trait]
impl ToolHandler for CreatePatternHandler {
    fn name(&self) -> &'static str {
        "grasshopper_create_pattern"
    }

    fn description(&self) -> &'static str {
        "Create a component pattern on the canvas from a high-level description."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"description": {"type": "string"}},
            "required": ["description"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let description = require_str(&args, "description")?;
        let result = ctx.grasshopper.create_pattern(description).await?;
        Ok(render(&result))
    }
}

/// `grasshopper_get_available_patterns`
pub struct GetAvailablePatternsHandler;

#[async_trait]
impl ToolHandler for GetAvailablePatternsHandler {
    fn name(&self) -> &'static str {
        "grasshopper_get_available_patterns"
    }

    fn description(&self) -> &'static str {
        "List the pattern descriptions available for a query."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"query": {"type": "string"}},
            "required": ["query"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let query = require_str(&args, "query")?;
        let result = ctx.grasshopper.get_available_patterns(query).await?;
        Ok(render(&result))
    }
}

/// `grasshopper_search_components`
pub struct SearchComponentsHandler;

#[async_trait]
impl ToolHandler for SearchComponentsHandler {
    fn name(&self) -> &'static str {
        "grasshopper_search_components"
    }

    fn description(&self) -> &'static str {
        "Search the component library by name or category."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"query": {"type": "string"}},
            "required": ["query"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let query = require_str(&args, "query")?;
        let result = ctx.grasshopper.search_components(query).await?;
        Ok(render(&result))
    }
}

/// `grasshopper_get_component_parameters`
pub struct GetComponentParametersHandler;

#[async_trait]
impl ToolHandler for GetComponentParametersHandler {
    fn name(&self) -> &'static str {
        "grasshopper_get_component_parameters"
    }

    fn description(&self) -> &'static str {
        "List the input and output parameters of a component type."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"component_type": {"type": "string"}},
            "required": ["component_type"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let component_type = require_str(&args, "component_type")?;
        let result = ctx
            .grasshopper
            .get_component_parameters(component_type)
            .await?;
        Ok(render(&result))
    }
}

/// `grasshopper_validate_connection`
pub struct ValidateConnectionHandler;

#[async_trait]
impl ToolHandler for ValidateConnectionHandler {
    fn name(&self) -> &'static str {
        "grasshopper_validate_connection"
    }

    fn description(&self) -> &'static str {
        "Check whether two components can be wired together before connecting them."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "source_id": {"type": "string"},
                "target_id": {"type": "string"},
                "source_param": {"type": "string"},
                "target_param": {"type": "string"}
            },
            "required": ["source_id", "target_id"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let source_id = require_str(&args, "source_id")?;
        let target_id = require_str(&args, "target_id")?;
        let result = ctx
            .grasshopper
            .validate_connection(
                source_id,
                target_id,
                optional_str(&args, "source_param"),
                optional_str(&args, "target_param"),
            )
            .await?;
        Ok(render(&result))
    }
}

/// `grasshopper_clear_document`
pub struct ClearDocumentHandler;

#[async_trait]
impl ToolHandler for ClearDocumentHandler {
    fn name(&self) -> &'static str {
        "grasshopper_clear_document"
    }

    fn description(&self) -> &'static str {
        "Remove every component from the canvas."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn call(&self, _args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let result = ctx.grasshopper.clear_document().await?;
        Ok(render(&result))
    }
}

/// `grasshopper_save_document`
pub struct SaveDocumentHandler;

#[async_trait]
impl ToolHandler for SaveDocumentHandler {
    fn name(&self) -> &'static str {
        "grasshopper_save_document"
    }

    fn description(&self) -> &'static str {
        "Save the Grasshopper document to a path on the host machine."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"path": {"type": "string"}},
            "required": ["path"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let path = require_str(&args, "path")?;
        let result = ctx.grasshopper.save_document(path).await?;
        Ok(render(&result))
    }
}

/// `grasshopper_load_document`
pub struct LoadDocumentHandler;

#[async_trait]
impl ToolHandler for LoadDocumentHandler {
    fn name(&self) -> &'static str {
        "grasshopper_load_document"
    }

    fn description(&self) -> &'static str {
        "Load a Grasshopper document from a path on the host machine."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"path": {"type": "string"}},
            "required": ["path"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let path = require_str(&args, "path")?;
        let result = ctx.grasshopper.load_document(path).await?;
        Ok(render(&result))
    }
}
