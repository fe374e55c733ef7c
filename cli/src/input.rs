//! Loading input records from TOML or JSON files

use crate::error::InputError;
use body_composition_shared::CompositionInput;
use std::path::Path;
use tracing::debug;

/// Serialization format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Toml,
    Json,
}

impl InputFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, InputError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match ext.as_str() {
            "toml" => Ok(InputFormat::Toml),
            "json" => Ok(InputFormat::Json),
            _ => Err(InputError::UnsupportedExtension(ext)),
        }
    }
}

/// Parse an input record from a string
pub fn parse_input(contents: &str, format: InputFormat) -> Result<CompositionInput, InputError> {
    let input = match format {
        InputFormat::Toml => toml::from_str(contents)?,
        InputFormat::Json => serde_json::from_str(contents)?,
    };
    Ok(input)
}

/// Read and parse an input record from disk
pub fn load_input(path: &Path) -> Result<CompositionInput, InputError> {
    let format = InputFormat::from_path(path)?;
    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), ?format, "loading input");
    parse_input(&contents, format)
}
