//! Bridge health reporting.

use async_trait::async_trait;
use serde_json::{Value, json};

use cadbridge_bridge::Bridge;

use crate::context::ToolContext;
use crate::errors::RpcError;
use crate::handlers::render;
use crate::registry::ToolHandler;

/// `bridge_status`
///
/// Never fails: an unreachable host shows up as an error-shaped entry in the
/// report, not as a tool failure.
pub struct BridgeStatusHandler;

async fn probe(bridge: &dyn Bridge) -> Value {
    let connected = bridge.client().is_connected().await;
    let ping = bridge.ping().await;
    json!({
        "endpoint": bridge.client().config().endpoint(),
        "connected": connected,
        "ping": ping,
    })
}

#[async_trait]
impl ToolHandler for BridgeStatusHandler {
    fn name(&self) -> &'static str {
        "bridge_status"
    }

    fn description(&self) -> &'static str {
        "Report connection state and ping results for both CAD hosts."
    }

    fn input_schema(&self) -> Value {
        json!({"type": "object", "properties": {}})
    }

    async fn call(&self, _args: Value, ctx: &ToolContext) -> Result<String, RpcError> {
        let report = json!({
            "rhino": probe(ctx.rhino.as_ref()).await,
            "grasshopper": probe(ctx.grasshopper.as_ref()).await,
            "checkedAt": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        });
        Ok(render(&report))
    }
}
