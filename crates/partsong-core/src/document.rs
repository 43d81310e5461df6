//! Reading progression and exercise documents from disk.
//!
//! Files ending in `.json` are parsed as JSON; everything else is parsed as
//! TOML.

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::{Error, Result};

/// Document formats understood by [`load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    Json,
}

impl Format {
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Parse a document held in memory.
pub fn parse<T: DeserializeOwned>(content: &str, format: Format) -> Result<T> {
    match format {
        Format::Json => Ok(serde_json::from_str(content)?),
        Format::Toml => toml::from_str(content).map_err(|e| Error::InvalidData(e.to_string())),
    }
}

/// Read and parse a document, choosing the format from the file extension.
pub fn load<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    let value = parse(&content, Format::from_path(path)).map_err(|e| {
        Error::InvalidData(format!("failed to parse {}: {}", path.display(), e))
    })?;
    log::info!("Loaded {}", path.display());
    Ok(value)
}
