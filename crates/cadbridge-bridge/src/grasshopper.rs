//! Grasshopper bridge façade.
//!
//! Parameter names on the wire are camelCase (`sourceId`, `componentId`, …)
//! exactly as the Grasshopper listener expects.

use serde_json::{Map, Value, json};

use cadbridge_core::{ConnectionConfig, Result};

use crate::bridge::Bridge;
use crate::client::BridgeClient;

/// Bridge to the Grasshopper canvas host.
#[derive(Debug)]
pub struct GrasshopperBridge {
    client: BridgeClient,
}

/// Optional endpoint selectors for a component connection.
///
/// A parameter can be addressed by name or by index; when both are given the
/// name wins.
#[derive(Clone, Debug, Default)]
pub struct ConnectOptions {
    /// Source parameter name.
    pub source_param: Option<String>,
    /// Source parameter index (used when no name is given).
    pub source_param_index: Option<i64>,
    /// Target parameter name.
    pub target_param: Option<String>,
    /// Target parameter index (used when no name is given).
    pub target_param_index: Option<i64>,
}

impl Bridge for GrasshopperBridge {
    fn name(&self) -> &'static str {
        "grasshopper"
    }

    fn client(&self) -> &BridgeClient {
        &self.client
    }
}

impl GrasshopperBridge {
    /// Create a bridge for the given endpoint (does not connect).
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            client: BridgeClient::new(config),
        }
    }

    /// Add a component to the canvas at the given position.
    pub async fn add_component(&self, component_type: &str, x: f64, y: f64) -> Result<Value> {
        self.send_command(
            "add_component",
            Some(object(json!({"type": component_type, "x": x, "y": y}))),
        )
        .await
    }

    /// Connect two components.
    pub async fn connect_components(
        &self,
        source_id: &str,
        target_id: &str,
        options: ConnectOptions,
    ) -> Result<Value> {
        self.send_command(
            "connect_components",
            Some(connect_params(source_id, target_id, &options)),
        )
        .await
    }

    /// Fetch document-level information.
    pub async fn get_document_info(&self) -> Result<Value> {
        self.send_command("get_document_info", None).await
    }

    /// List every component in the document.
    pub async fn get_all_components(&self) -> Result<Value> {
        self.send_command("get_all_components", None).await
    }

    /// Fetch information about one component.
    pub async fn get_component_info(&self, component_id: &str) -> Result<Value> {
        self.send_command(
            "get_component_info",
            Some(object(json!({"componentId": component_id}))),
        )
        .await
    }

    /// List every connection between components.
    pub async fn get_connections(&self) -> Result<Value> {
        self.send_command("get_connections", None).await
    }

    /// Create a component pattern from a description.
    pub async fn create_pattern(&self, description: &str) -> Result<Value> {
        self.send_command(
            "create_pattern",
            Some(object(json!({"description": description}))),
        )
        .await
    }

    /// List available patterns matching a query.
    pub async fn get_available_patterns(&self, query: &str) -> Result<Value> {
        self.send_command(
            "get_available_patterns",
            Some(object(json!({"query": query}))),
        )
        .await
    }

    /// Search components by name or category.
    pub async fn search_components(&self, query: &str) -> Result<Value> {
        self.send_command("search_components", Some(object(json!({"query": query}))))
            .await
    }

    /// Fetch the parameter list for a component type.
    pub async fn get_component_parameters(&self, component_type: &str) -> Result<Value> {
        self.send_command(
            "get_component_parameters",
            Some(object(json!({"componentType": component_type}))),
        )
        .await
    }

    /// Check whether a connection between two components is possible.
    pub async fn validate_connection(
        &self,
        source_id: &str,
        target_id: &str,
        source_param: Option<&str>,
        target_param: Option<&str>,
    ) -> Result<Value> {
        let mut params = object(json!({"sourceId": source_id, "targetId": target_id}));
        if let Some(p) = source_param {
            let _ = params.insert("sourceParam".to_owned(), json!(p));
        }
        if let Some(p) = target_param {
            let _ = params.insert("targetParam".to_owned(), json!(p));
        }
        self.send_command("validate_connection", Some(params)).await
    }

    /// Clear the document.
    pub async fn clear_document(&self) -> Result<Value> {
        self.send_command("clear_document", None).await
    }

    /// Save the document to a path on the host.
    pub async fn save_document(&self, path: &str) -> Result<Value> {
        self.send_command("save_document", Some(object(json!({"path": path}))))
            .await
    }

    /// Load a document from a path on the host.
    pub async fn load_document(&self, path: &str) -> Result<Value> {
        self.send_command("load_document", Some(object(json!({"path": path}))))
            .await
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn connect_params(source_id: &str, target_id: &str, options: &ConnectOptions) -> Map<String, Value> {
    let mut params = object(json!({"sourceId": source_id, "targetId": target_id}));

    if let Some(ref name) = options.source_param {
        let _ = params.insert("sourceParam".to_owned(), json!(name));
    } else if let Some(index) = options.source_param_index {
        let _ = params.insert("sourceParamIndex".to_owned(), json!(index));
    }

    if let Some(ref name) = options.target_param {
        let _ = params.insert("targetParam".to_owned(), json!(name));
    } else if let Some(index) = options.target_param_index {
        let _ = params.insert("targetParamIndex".to_owned(), json!(index));
    }

    params
}
