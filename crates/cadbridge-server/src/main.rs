//! # cadbridge-server
//!
//! MCP server binary — loads settings, builds the two CAD bridges, and
//! serves the tool surface over stdio.

#![deny(unsafe_code)]

mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cadbridge_bridge::{Bridge, GrasshopperBridge, RhinoBridge};
use cadbridge_rpc::{ToolContext, ToolRegistry};
use cadbridge_settings::BridgeSettings;

/// MCP server bridging Rhino and Grasshopper.
#[derive(Parser, Debug)]
#[command(name = "cadbridge", about = "MCP server bridging Rhino and Grasshopper")]
struct Cli {
    /// Path to the settings file (defaults to `~/.cadbridge/settings.json`).
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Log level filter override (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,
}

/// Resolve the tracing filter: CLI flag beats settings, and the debug flag
/// in settings upgrades the default to `debug`.
fn log_filter(settings: &BridgeSettings, cli_level: Option<&str>) -> String {
    if let Some(level) = cli_level {
        return level.to_owned();
    }
    if settings.server.debug {
        "debug".to_owned()
    } else {
        settings.server.log_level.clone()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let settings_path = args
        .settings
        .clone()
        .unwrap_or_else(cadbridge_settings::settings_path);
    let settings = cadbridge_settings::load_settings_from_path(&settings_path)
        .with_context(|| format!("failed to load settings from {}", settings_path.display()))?;

    // stdout carries the protocol; every log line goes to stderr.
    let filter = log_filter(&settings, args.log_level.as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let rhino = Arc::new(RhinoBridge::new(
        settings
            .rhino
            .connection_config()
            .context("invalid rhino connection settings")?,
    ));
    let grasshopper = Arc::new(GrasshopperBridge::new(
        settings
            .grasshopper
            .connection_config()
            .context("invalid grasshopper connection settings")?,
    ));

    // A host being down at startup is normal; commands connect on demand.
    let rhino_up = rhino.initialize().await;
    let grasshopper_up = grasshopper.initialize().await;
    tracing::info!(rhino = rhino_up, grasshopper = grasshopper_up, "bridge startup");

    let ctx = ToolContext::new(rhino.clone(), grasshopper.clone());
    let mut registry = ToolRegistry::new();
    cadbridge_rpc::handlers::register_all(&mut registry);
    tracing::info!(tools = registry.len(), "tool registry populated");

    let mcp = server::McpServer::new(settings.server.name.clone(), registry, ctx);
    mcp.run(tokio::io::stdin(), tokio::io::stdout())
        .await
        .context("stdio transport failed")?;

    rhino.cleanup().await;
    grasshopper.cleanup().await;
    Ok(())
}
