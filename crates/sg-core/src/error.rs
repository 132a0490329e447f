//! Error types for sg-core

use thiserror::Error;

/// Core error type for Snowgauge
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Invalid configuration value
    #[error("[E002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E003: Schema not listed in the configuration
    #[error("[E003] Unknown schema '{name}'. Known schemas: {known}")]
    UnknownSchema { name: String, known: String },

    /// E004: No schema given and none configured
    #[error("[E004] No schema selected. Pass --schema or set default_schema in the config")]
    NoSchemaSelected,

    /// E005: IO error with file path context
    #[error("[E005] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E006: YAML parse error
    #[error("[E006] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
