//! Descriptor catalogues: descriptor tables stored as JSON or TOML documents.
//!
//! Catalogues keep document order, which decides bit allocation. Probes are written as ids
//! (`"check": "node"`) and bound later through [`ProbeSet`](crate::ProbeSet).

use crate::error::{KernelError, KernelErrorExt};
use fhub_domain::DescriptorTable;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Serialization format of a catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogueFormat {
    Json,
    Toml,
}

impl CatalogueFormat {
    /// Guesses the format from a file extension (`json` or `toml`, case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Parses a catalogue document.
///
/// # Errors
/// [`KernelError::Json`] or [`KernelError::Toml`] if the document is malformed or contains an
/// invalid descriptor.
pub fn parse_catalogue(text: &str, format: CatalogueFormat) -> Result<DescriptorTable, KernelError> {
    let table = match format {
        CatalogueFormat::Json => serde_json::from_str::<DescriptorTable>(text)?,
        CatalogueFormat::Toml => toml::from_str::<DescriptorTable>(text)?,
    };
    debug!(format = ?format, features = table.len(), "Parsed catalogue");
    Ok(table)
}

/// Reads and parses a catalogue file, choosing the format from its extension.
///
/// # Errors
/// * [`KernelError::UnsupportedFormat`] for an extension other than `json` or `toml`.
/// * [`KernelError::Io`] if the file cannot be read.
/// * [`KernelError::Json`] or [`KernelError::Toml`] if it cannot be parsed.
pub fn read_catalogue(path: impl AsRef<Path>) -> Result<DescriptorTable, KernelError> {
    let path = path.as_ref();
    let format = CatalogueFormat::from_path(path).ok_or_else(|| KernelError::UnsupportedFormat {
        path: path.display().to_string(),
        context: None,
    })?;

    let text = fs::read_to_string(path).context(format!("Catalogue: {}", path.display()))?;
    parse_catalogue(&text, format).context(format!("Catalogue: {}", path.display()))
}
