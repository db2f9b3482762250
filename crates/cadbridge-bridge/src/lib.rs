//! # cadbridge-bridge
//!
//! TCP bridges to the CAD hosts.
//!
//! Layered bottom-up:
//!
//! - [`transport`] — moves exactly one JSON value per direction across a raw
//!   byte stream (newline-terminated requests, parse-retry framed responses)
//! - [`client::BridgeClient`] — owns the connection, serializes every round
//!   trip behind one async mutex, applies the reconnect policy
//! - [`bridge::Bridge`] — the capability set every platform bridge shares
//!   (initialize, cleanup, send_command, check_connection, ping)
//! - [`rhino::RhinoBridge`] / [`grasshopper::GrasshopperBridge`] — typed
//!   façades over the generic command primitive, one per host
//!
//! The wire protocol has no correlation IDs and no pipelining: one command in
//! flight per connection, strictly request-then-response.

#![deny(unsafe_code)]

pub mod bridge;
pub mod client;
pub mod grasshopper;
pub mod rhino;
pub mod transport;

pub use bridge::Bridge;
pub use client::BridgeClient;
pub use grasshopper::{ConnectOptions, GrasshopperBridge};
pub use rhino::RhinoBridge;
