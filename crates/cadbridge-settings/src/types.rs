//! Settings types: server identity plus one connection block per CAD host.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use cadbridge_core::{BridgeError, ConnectionConfig};

/// Top-level settings tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BridgeSettings {
    /// Server identity and logging.
    pub server: ServerSettings,
    /// Rhino connection block.
    pub rhino: HostSettings,
    /// Grasshopper connection block.
    pub grasshopper: HostSettings,
}

/// Server identity and logging settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Server name announced during MCP initialization.
    pub name: String,
    /// Log level filter (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
    /// Whether to enable verbose wire-level logging.
    pub debug: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "cadbridge".to_string(),
            log_level: "info".to_string(),
            debug: false,
        }
    }
}

/// Connection settings for one CAD host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HostSettings {
    /// Host address.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Timeout in seconds for connect attempts and response reads.
    pub timeout: f64,
    /// Auto-reconnect on connection loss.
    pub auto_reconnect: bool,
}

impl HostSettings {
    fn new(port: u16) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port,
            timeout: 15.0,
            auto_reconnect: true,
        }
    }

    /// Convert to a validated [`ConnectionConfig`].
    pub fn connection_config(&self) -> Result<ConnectionConfig, BridgeError> {
        ConnectionConfig::new(
            self.host.clone(),
            self.port,
            Duration::from_secs_f64(self.timeout),
            self.auto_reconnect,
        )
    }
}

impl Default for HostSettings {
    // Rhino's default port; the grasshopper block overrides it.
    fn default() -> Self {
        Self::new(1999)
    }
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            rhino: HostSettings::new(1999),
            grasshopper: HostSettings::new(8080),
        }
    }
}
