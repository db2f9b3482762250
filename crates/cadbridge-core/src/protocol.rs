//! Wire-format types for the host command protocol.
//!
//! One round trip is one UTF-8 JSON request object terminated by a single
//! `\n`, answered by one UTF-8 JSON response object with no explicit
//! terminator. There are no correlation IDs: the protocol is strictly
//! half-duplex, one command in flight per connection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::BridgeError;

/// A command sent to a CAD host: `{"type": ..., "params": {...}}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Command {
    /// Command name, e.g. `create_object` or `add_component`.
    #[serde(rename = "type")]
    pub command_type: String,
    /// Command parameters. Always present on the wire, possibly empty.
    pub params: Map<String, Value>,
}

impl Command {
    /// Build a command. A `None` params is sent as an empty object.
    pub fn new(command_type: impl Into<String>, params: Option<Map<String, Value>>) -> Self {
        Self {
            command_type: command_type.into(),
            params: params.unwrap_or_default(),
        }
    }

    /// Serialize to the wire form (no trailing newline).
    pub fn to_wire(&self) -> Result<Vec<u8>, BridgeError> {
        serde_json::to_vec(self).map_err(|e| BridgeError::Protocol(format!("encode command: {e}")))
    }
}

/// Response status as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// Command succeeded.
    Ok,
    /// Command failed; `message` carries the reason.
    Error,
}

/// A decoded host response.
///
/// Decoding is deliberately lenient to match observed host behavior:
/// a missing `status` counts as success and a missing `result` defaults
/// to an empty object.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Response {
    /// Reported status, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ResponseStatus>,
    /// Result payload (success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure message (error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Response {
    /// Decode a response from a raw JSON value.
    pub fn from_value(value: Value) -> Result<Self, BridgeError> {
        serde_json::from_value(value)
            .map_err(|e| BridgeError::Protocol(format!("decode response: {e}")))
    }

    /// Consume the response, mapping `status: "error"` to
    /// [`BridgeError::Remote`] and defaulting an absent result to `{}`.
    pub fn into_result(self) -> Result<Value, BridgeError> {
        if self.status == Some(ResponseStatus::Error) {
            return Err(BridgeError::Remote(
                self.message.unwrap_or_else(|| "Unknown error".to_owned()),
            ));
        }
        Ok(self.result.unwrap_or_else(|| Value::Object(Map::new())))
    }
}
