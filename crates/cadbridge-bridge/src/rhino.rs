//! Rhino bridge façade.
//!
//! Every method is a pure translation to the generic command primitive:
//! parameter-name mapping plus optional-field filtering, nothing else.

use serde_json::{Map, Value, json};

use cadbridge_core::{ConnectionConfig, Result};

use crate::bridge::Bridge;
use crate::client::BridgeClient;

/// Bridge to the Rhino modeling host.
#[derive(Debug)]
pub struct RhinoBridge {
    client: BridgeClient,
}

impl Bridge for RhinoBridge {
    fn name(&self) -> &'static str {
        "rhino"
    }

    fn client(&self) -> &BridgeClient {
        &self.client
    }
}

impl RhinoBridge {
    /// Create a bridge for the given endpoint (does not connect).
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            client: BridgeClient::new(config),
        }
    }

    /// Create an object in the active document.
    ///
    /// `extra` carries optional attributes (name, color, translation, …);
    /// null entries are dropped rather than sent.
    pub async fn create_object(
        &self,
        object_type: &str,
        params: Value,
        extra: Option<Map<String, Value>>,
    ) -> Result<Value> {
        self.send_command(
            "create_object",
            Some(create_object_params(object_type, params, extra)),
        )
        .await
    }

    /// Fetch document-level information.
    pub async fn get_document_info(&self) -> Result<Value> {
        self.send_command("get_document_info", None).await
    }

    /// Fetch information about one object.
    pub async fn get_object_info(&self, object_id: &str) -> Result<Value> {
        self.send_command("get_object_info", Some(object(json!({"object_id": object_id}))))
            .await
    }

    /// Modify an existing object.
    pub async fn modify_object(&self, object_id: &str, params: Value) -> Result<Value> {
        self.send_command(
            "modify_object",
            Some(object(json!({"object_id": object_id, "params": params}))),
        )
        .await
    }

    /// Delete an object.
    pub async fn delete_object(&self, object_id: &str) -> Result<Value> {
        self.send_command("delete_object", Some(object(json!({"object_id": object_id}))))
            .await
    }

    /// Select objects matching the given filters.
    pub async fn select_objects(&self, filters: Value) -> Result<Value> {
        self.send_command("select_objects", Some(object(json!({"filters": filters}))))
            .await
    }

    /// Execute RhinoScript Python code in the host.
    pub async fn execute_script(&self, script: &str) -> Result<Value> {
        self.send_command(
            "execute_rhinoscript_python_code",
            Some(object(json!({"script": script}))),
        )
        .await
    }

    /// Create a layer, optionally with an RGB color.
    pub async fn create_layer(&self, name: &str, color: Option<[u8; 3]>) -> Result<Value> {
        let mut params = object(json!({"name": name}));
        if let Some(color) = color {
            let _ = params.insert("color".to_owned(), json!(color));
        }
        self.send_command("create_layer", Some(params)).await
    }

    /// Fetch the current layer.
    pub async fn get_current_layer(&self) -> Result<Value> {
        self.send_command("get_or_set_current_layer", None).await
    }

    /// Switch the current layer.
    pub async fn set_current_layer(&self, layer_name: &str) -> Result<Value> {
        self.send_command(
            "get_or_set_current_layer",
            Some(object(json!({"layer_name": layer_name}))),
        )
        .await
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn create_object_params(
    object_type: &str,
    params: Value,
    extra: Option<Map<String, Value>>,
) -> Map<String, Value> {
    let mut command_params = object(json!({"type": object_type, "params": params}));
    if let Some(extra) = extra {
        for (key, value) in extra {
            if !value.is_null() {
                let _ = command_params.insert(key, value);
            }
        }
    }
    command_params
}
