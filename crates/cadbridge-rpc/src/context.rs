//! Shared state handed to every tool handler.

use std::sync::Arc;

use cadbridge_bridge::{GrasshopperBridge, RhinoBridge};

/// Bridges available to tool handlers.
///
/// Cloning is cheap; both bridges live behind `Arc` and serialize their own
/// command traffic internally.
#[derive(Clone)]
pub struct ToolContext {
    /// Bridge to the Rhino modeling host.
    pub rhino: Arc<RhinoBridge>,
    /// Bridge to the Grasshopper canvas host.
    pub grasshopper: Arc<GrasshopperBridge>,
}

impl ToolContext {
    /// Build a context from the two bridges.
    pub fn new(rhino: Arc<RhinoBridge>, grasshopper: Arc<GrasshopperBridge>) -> Self {
        Self { rhino, grasshopper }
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext").finish_non_exhaustive()
    }
}
