//! # cadbridge-core
//!
//! Foundation types shared by every cadbridge crate.
//!
//! - **Errors**: [`errors::BridgeError`] taxonomy via `thiserror`
//! - **Wire protocol**: [`protocol::Command`] and [`protocol::Response`] for
//!   the newline-terminated JSON command protocol the CAD hosts speak
//! - **Configuration**: [`config::ConnectionConfig`] for one remote host
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other cadbridge crates.

#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod protocol;

pub use config::ConnectionConfig;
pub use errors::{BridgeError, Result};
pub use protocol::{Command, Response};
