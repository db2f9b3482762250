//! RPC error codes and error type.

use cadbridge_core::BridgeError;

use crate::types::JsonRpcErrorBody;

// ── JSON-RPC 2.0 error codes ────────────────────────────────────────

/// Request body was not valid JSON.
pub const PARSE_ERROR: i64 = -32700;
/// Request was JSON but not a valid request object.
pub const INVALID_REQUEST: i64 = -32600;
/// Method not found.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// Invalid or missing parameters.
pub const INVALID_PARAMS: i64 = -32602;
/// Unexpected internal error.
pub const INTERNAL_ERROR: i64 = -32603;

/// RPC error type returned by the dispatcher and handlers.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// Body was not parseable JSON.
    #[error("parse error: {message}")]
    Parse {
        /// What failed to parse.
        message: String,
    },

    /// Request object was malformed.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Description of the defect.
        message: String,
    },

    /// No such method or tool.
    #[error("method not found: {method}")]
    MethodNotFound {
        /// The requested name.
        method: String,
    },

    /// Required parameter missing or wrong type.
    #[error("{message}")]
    InvalidParams {
        /// Description of what is wrong.
        message: String,
    },

    /// Internal server error.
    #[error("{message}")]
    Internal {
        /// Description.
        message: String,
    },
}

impl RpcError {
    /// Numeric JSON-RPC code for this variant.
    pub fn code(&self) -> i64 {
        match self {
            Self::Parse { .. } => PARSE_ERROR,
            Self::InvalidRequest { .. } => INVALID_REQUEST,
            Self::MethodNotFound { .. } => METHOD_NOT_FOUND,
            Self::InvalidParams { .. } => INVALID_PARAMS,
            Self::Internal { .. } => INTERNAL_ERROR,
        }
    }

    /// Convert to the wire-format error body.
    pub fn to_error_body(&self) -> JsonRpcErrorBody {
        JsonRpcErrorBody {
            code: self.code(),
            message: self.to_string(),
            data: None,
        }
    }
}

impl From<BridgeError> for RpcError {
    fn from(err: BridgeError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}
