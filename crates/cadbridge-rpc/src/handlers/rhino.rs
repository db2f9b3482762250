//! Tool handlers targeting the Rhino modeling host.

use async_trait::async_trait;
use serde_json::{Map, Value, json};

use crate::context::ToolContext;
use crate::errors::RpcError;
use crate::handlers::{object_arg, optional_str, render, require_str};
use crate::registry::ToolHandler;

/// Attribute keys forwarded from tool arguments to `create_object`.
const OBJECT_ATTRIBUTES: [&str; 5] = ["name", "color", "translation", "rotation", "scale"];

fn attribute_map(args: &Value) -> Map<String, Value> {
    let mut extra = Map::new();
    for key in OBJECT_ATTRIBUTES {
        if let Some(value) = args.get(key) {
            if !value.is_null() {
                let _ = extra.insert(key.to_owned(), value.clone());
            }
        }
    }
    extra
}

fn optional_rgb(args: &Value, key: &str) -> Result<Option<[u8; 3]>, RpcError> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    if value.is_null() {
        return Ok(None);
    }
    let invalid = || RpcError::InvalidParams {
        message: format!("{key} must be an array of three integers in 0-255"),
    };
    let items = value.as_array().ok_or_else(invalid)?;
    if items.len() != 3 {
        return Err(invalid());
    }
    let mut rgb = [0u8; 3];
    for (slot, item) in rgb.iter_mut().zip(items) {
        let n = item.as_u64().ok_or_else(invalid)?;
        *slot = u8::try_from(n).map_err(|_| invalid())?;
    }
    Ok(Some(rgb))
}

// ── Handlers ────────────────────────────────────────────────────────

/// `rhino_create_object`
pub struct CreateObjectHandler;

#[async_trait]
impl ToolHandler for CreateObjectHandler {
    fn name(&self) -> &'static str {
        "rhino_create_object"
    }

    fn description(&self) -> &'static str {
        "Create an object in the Rhino document. Geometry parameters go in \
         'params'; optional attributes (name, color, translation, rotation, \
         scale) are applied after creation."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "type": {"type": "string", "description": "Object type, e.g. box, sphere, curve"},
                "params": {"type": "object", "description": "Geometry parameters for the object type"},
                "name": {"type": "string"},
                "color": {"type": "array", "items": {"type": "integer"}},
                "translation": {"type": "array", "items": {"type": "number"}},
                "rotation": {"type": "array", "items": {"type": "number"}},
                "scale": {"type": "array", "items": {"type": "number"}}
            },
            "required": ["type"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let object_type = require_str(&args, "type")?;
        let params = object_arg(&args, "params");
        let extra = attribute_map(&args);
        let extra = if extra.is_empty() { None } else { Some(extra) };
        let result = ctx.rhino.create_object(object_type, params, extra).await?;
        Ok(render(&result))
    }
}

/// `rhino_get_document_info`
pub struct GetDocumentInfoHandler;

#[async_trait]
impl ToolHandler for GetDocumentInfoHandler {
    fn name(&self) -> &'static str {
        "rhino_get_document_info"
    }

    fn description(&self) -> &'static str {
        "Fetch information about the active Rhino document: object counts, layers, and units."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn call(&self, _args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let result = ctx.rhino.get_document_info().await?;
        Ok(render(&result))
    }
}

/// `rhino_get_object_info`
pub struct GetObjectInfoHandler;

#[async_trait]
impl ToolHandler for GetObjectInfoHandler {
    fn name(&self) -> &'static str {
        "rhino_get_object_info"
    }

    fn description(&self) -> &'static str {
        "Fetch geometry and attributes of one object by its identifier."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"object_id": {"type": "string"}},
            "required": ["object_id"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let object_id = require_str(&args, "object_id")?;
        let result = ctx.rhino.get_object_info(object_id).await?;
        Ok(render(&result))
    }
}

/// `rhino_modify_object`
pub struct ModifyObjectHandler;

#[async_trait]
impl ToolHandler for ModifyObjectHandler {
    fn name(&self) -> &'static str {
        "rhino_modify_object"
    }

    fn description(&self) -> &'static str {
        "Modify an existing object's geometry or attributes."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "object_id": {"type": "string"},
                "params": {"type": "object", "description": "Properties to change"}
            },
            "required": ["object_id", "params"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let object_id = require_str(&args, "object_id")?;
        let params = object_arg(&args, "params");
        let result = ctx.rhino.modify_object(object_id, params).await?;
        Ok(render(&result))
    }
}

/// `rhino_delete_object`
pub struct DeleteObjectHandler;

#[async_trait]
impl ToolHandler for DeleteObjectHandler {
    fn name(&self) -> &'static str {
        "rhino_delete_object"
    }

    fn description(&self) -> &'static str {
        "Delete an object from the document by its identifier."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"object_id": {"type": "string"}},
            "required": ["object_id"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let object_id = require_str(&args, "object_id")?;
        let result = ctx.rhino.delete_object(object_id).await?;
        Ok(render(&result))
    }
}

/// `rhino_select_objects`
pub struct SelectObjectsHandler;

#[async_trait]
impl ToolHandler for SelectObjectsHandler {
    fn name(&self) -> &'static str {
        "rhino_select_objects"
    }

    fn description(&self) -> &'static str {
        "Select objects in the document matching the given filters (name, type, layer, color)."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "filters": {"type": "object", "description": "Attribute filters to match"}
            }
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let filters = object_arg(&args, "filters");
        let result = ctx.rhino.select_objects(filters).await?;
        Ok(render(&result))
    }
}

/// `rhino_execute_script`
pub struct ExecuteScriptHandler;

#[async_trait]
impl ToolHandler for ExecuteScriptHandler {
    fn name(&self) -> &'static str {
        "rhino_execute_script"
    }

    fn description(&self) -> &'static str {
        "Execute RhinoScript Python code inside the Rhino host and return its output."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"script": {"type": "string"}},
            "required": ["script"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let script = require_str(&args, "script")?;
        let result = ctx.rhino.execute_script(script).await?;
        Ok(render(&result))
    }
}

/// `rhino_create_layer`
pub struct CreateLayerHandler;

#[async_trait]
impl ToolHandler for CreateLayerHandler {
    fn name(&self) -> &'static str {
        "rhino_create_layer"
    }

    fn description(&self) -> &'static str {
        "Create a layer, optionally with an RGB color."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "color": {"type": "array", "items": {"type": "integer"}, "minItems": 3, "maxItems": 3}
            },
            "required": ["name"]
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let name = require_str(&args, "name")?;
        let color = optional_rgb(&args, "color")?;
        let result = ctx.rhino.create_layer(name, color).await?;
        Ok(render(&result))
    }
}

/// `rhino_get_or_set_current_layer`
pub struct CurrentLayerHandler;

#[async_trait]
impl ToolHandler for CurrentLayerHandler {
    fn name(&self) -> &'static str {
        "rhino_get_or_set_current_layer"
    }

    fn description(&self) -> &'static str {
        "Read the current layer, or switch to 'layer_name' when given."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"layer_name": {"type": "string"}}
        })
    }

    async fn call(&self, args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let result = match optional_str(&args, "layer_name") {
            Some(layer_name) => ctx.rhino.set_current_layer(layer_name).await?,
            None => ctx.rhino.get_current_layer().await?,
        };
        Ok(render(&result))
    }
}
