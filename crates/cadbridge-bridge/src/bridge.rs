//! The capability set shared by every platform bridge.

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::{error, info};

use cadbridge_core::Result;

use crate::client::BridgeClient;

/// One bridge per remote CAD host: connection lifecycle plus the generic
/// command primitive. Façades add typed methods on top; everything here is
/// provided behavior over [`BridgeClient`].
#[async_trait]
pub trait Bridge: Send + Sync {
    /// Platform name for logs and status payloads.
    fn name(&self) -> &'static str;

    /// The underlying connection client.
    fn client(&self) -> &BridgeClient;

    /// Open the connection. Returns `true` on success; failure is logged and
    /// reported as `false` rather than propagated, matching the startup
    /// contract (a host being down must not abort server boot).
    async fn initialize(&self) -> bool {
        info!(bridge = self.name(), "initializing bridge");
        match self.client().connect().await {
            Ok(()) => true,
            Err(e) => {
                error!(bridge = self.name(), error = %e, "failed to connect");
                false
            }
        }
    }

    /// Best-effort teardown.
    async fn cleanup(&self) {
        info!(bridge = self.name(), "cleaning up bridge");
        self.client().disconnect().await;
    }

    /// Send a command through the generic primitive.
    async fn send_command(
        &self,
        command_type: &str,
        params: Option<Map<String, Value>>,
    ) -> Result<Value> {
        self.client().send_command(command_type, params).await
    }

    /// Verify liveness with a ping round trip.
    async fn check_connection(&self) -> bool {
        self.client().check_connection().await
    }

    /// Infallible ping for health-check callers.
    ///
    /// Any failure is downgraded to an error-shaped value instead of being
    /// propagated.
    async fn ping(&self) -> Value {
        match self.client().send_command("ping", None).await {
            Ok(result) => result,
            Err(e) => json!({"status": "error", "message": e.to_string()}),
        }
    }
}
