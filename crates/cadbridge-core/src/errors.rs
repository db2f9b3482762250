//! Error taxonomy for bridge operations.
//!
//! Four kinds cover everything a command round trip can fail with:
//!
//! - [`BridgeError::Connection`] — the socket could not be opened, or a
//!   fatal I/O error occurred while using it
//! - [`BridgeError::Timeout`] — no bytes arrived within the configured window
//! - [`BridgeError::Protocol`] — the stream closed mid-message or the bytes
//!   never parse as JSON
//! - [`BridgeError::Remote`] — the host answered with `status: "error"`; the
//!   connection itself remains usable

use thiserror::Error;

/// Errors produced by the bridge transport, lifecycle, and dispatcher.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Socket could not be opened, or failed fatally mid-operation.
    #[error("connection to {host}:{port} failed: {message}")]
    Connection {
        /// Remote host address.
        host: String,
        /// Remote port.
        port: u16,
        /// What went wrong.
        message: String,
    },

    /// No response within the configured timeout.
    #[error("timed out after {timeout_ms}ms waiting for {context}")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
        /// What we were waiting for.
        context: String,
    },

    /// The byte stream violated the one-JSON-value-per-response framing.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The host reported a command failure. Carries its message verbatim.
    #[error("{0}")]
    Remote(String),
}

impl BridgeError {
    /// Connection error for a given endpoint.
    pub fn connection(host: &str, port: u16, message: impl Into<String>) -> Self {
        Self::Connection {
            host: host.to_owned(),
            port,
            message: message.into(),
        }
    }

    /// Whether the underlying connection should be considered dead.
    ///
    /// `Remote` errors are host-level failures over a healthy transport;
    /// everything else means the socket is suspect.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Remote(_))
    }
}

/// Result type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
