//! CLI error types

use std::path::PathBuf;
use thiserror::Error;

/// Failures loading an input record from disk
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Unsupported input file extension {0:?} (expected .toml or .json)")]
    UnsupportedExtension(String),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML input: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}
