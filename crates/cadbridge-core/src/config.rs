//! Connection configuration for one remote host.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::BridgeError;

/// Immutable connection parameters for a single CAD host.
///
/// One instance per bridge; constructed once and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Host address.
    pub host: String,
    /// TCP port (1–65535).
    pub port: u16,
    /// Timeout applied to connect attempts and response reads, in seconds.
    #[serde(rename = "timeout")]
    pub timeout_secs: f64,
    /// Whether a failed send primes one reconnect attempt for the next call.
    pub auto_reconnect: bool,
}

impl ConnectionConfig {
    /// Build a validated config. Rejects port 0 and non-positive timeouts.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        timeout: Duration,
        auto_reconnect: bool,
    ) -> Result<Self, BridgeError> {
        let host = host.into();
        if port == 0 {
            return Err(BridgeError::connection(&host, port, "port must be 1-65535"));
        }
        if timeout.is_zero() {
            return Err(BridgeError::connection(
                &host,
                port,
                "timeout must be positive",
            ));
        }
        Ok(Self {
            host,
            port,
            timeout_secs: timeout.as_secs_f64(),
            auto_reconnect,
        })
    }

    /// The configured timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_secs)
    }

    /// `host:port` for logs and error messages.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn valid_config() {
        let cfg =
            ConnectionConfig::new("127.0.0.1", 1999, Duration::from_secs_f64(15.0), true).unwrap();
        assert_eq!(cfg.endpoint(), "127.0.0.1:1999");
        assert_eq!(cfg.timeout(), Duration::from_secs(15));
        assert!(cfg.auto_reconnect);
    }

    #[test]
    fn rejects_port_zero() {
        let err = ConnectionConfig::new("localhost", 0, Duration::from_secs(1), false).unwrap_err();
        assert_matches!(err, BridgeError::Connection { .. });
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = ConnectionConfig::new("localhost", 80, Duration::ZERO, false).unwrap_err();
        assert_matches!(err, BridgeError::Connection { .. });
    }

    #[test]
    fn serde_timeout_in_seconds() {
        let cfg =
            ConnectionConfig::new("127.0.0.1", 8080, Duration::from_secs_f64(2.5), true).unwrap();
        let json = serde_json::to_value(&cfg).unwrap();
        assert_eq!(json["timeout"], 2.5);
        let back: ConnectionConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, cfg);
    }
}
