//! Settings error types.

use thiserror::Error;

/// Errors that can occur when loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file exists but could not be read.
    #[error("could not read settings file: {0}")]
    Io(#[from] std::io::Error),
    /// Settings file is not valid JSON.
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A settings field holds a value outside its accepted range.
    #[error("invalid settings value: {0}")]
    InvalidValue(String),
}

impl SettingsError {
    /// Invalid value for a named settings field, e.g. `rhino.port`.
    pub fn invalid_value(field: &str, constraint: &str) -> Self {
        Self::InvalidValue(format!("{field} {constraint}"))
    }
}

/// Result type for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
