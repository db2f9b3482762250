//! # cadbridge-settings
//!
//! Configuration management with layered sources for the cadbridge server.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`BridgeSettings::default()`]
//! 2. **User file** — `~/.cadbridge/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** — `RHINO_*`, `GRASSHOPPER_*`, `CADBRIDGE_*`
//!    overrides (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! let settings = cadbridge_settings::load_settings().unwrap_or_default();
//! println!("Rhino endpoint: {}:{}", settings.rhino.host, settings.rhino.port);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::{BridgeSettings, HostSettings, ServerSettings};
