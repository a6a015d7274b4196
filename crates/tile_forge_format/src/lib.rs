//! Portable map format for tile_forge
//!
//! This crate converts a [`TileGrid`](tile_forge_core::TileGrid) plus the
//! loaded [`TilesetRegistry`](tile_forge_core::TilesetRegistry) into a
//! self-describing JSON document, and back.
//!
//! # Example
//!
//! ```rust,ignore
//! use tile_forge_format::{to_portable, from_portable, save_map, load_map, ExportOptions};
//!
//! let doc = to_portable(editor.grid(), &registry, &ExportOptions::named("Level 1"))?;
//! save_map(&doc, Path::new("level1.json"))?;
//!
//! let imported = from_portable(&load_map(Path::new("level1.json"))?)?;
//! ```

mod convert;
mod library;
mod types;
mod validate;

pub use convert::*;
pub use library::*;
pub use types::*;
pub use validate::*;

use std::path::Path;
use thiserror::Error;
use tile_forge_core::{GridError, LayerKind};
use tracing::info;

/// Errors that can occur when exporting, importing or storing maps
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cell ({x}, {y}) on layer {layer} references tileset '{key}', which is not loaded")]
    MissingTilesetReference {
        key: String,
        layer: LayerKind,
        x: u32,
        y: u32,
    },
    #[error("unsupported format version {found:?}, expected \"1.0\"")]
    UnsupportedFormatVersion { found: Option<String> },
    #[error("cell ({x}, {y}) on layer {layer} uses tileset index {index}, but the document has {count} tilesets")]
    TilesetIndexOutOfRange {
        index: usize,
        count: usize,
        layer: LayerKind,
        x: u32,
        y: u32,
    },
    #[error("layer {layer} does not match the map size: {reason}")]
    LayerShapeMismatch { layer: LayerKind, reason: String },
    #[error(transparent)]
    InvalidDimensions(#[from] GridError),
}

/// Serialize a document as pretty-printed JSON
pub fn to_json_string(map: &PortableMap) -> Result<String, FormatError> {
    Ok(serde_json::to_string_pretty(map)?)
}

/// Parse a document from JSON.
///
/// The `version` field is checked before the rest of the document is
/// interpreted, so a future format fails as a version error rather than a
/// parse error.
pub fn from_json_str(json: &str) -> Result<PortableMap, FormatError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    validate_version(value.get("version").and_then(|v| v.as_str()))?;
    Ok(serde_json::from_value(value)?)
}

/// Save a document to a JSON file
pub fn save_map(map: &PortableMap, path: &Path) -> Result<(), FormatError> {
    let content = to_json_string(map)?;
    std::fs::write(path, content)?;
    info!("saved map '{}' to {}", map.name, path.display());
    Ok(())
}

/// Load a document from a JSON file
pub fn load_map(path: &Path) -> Result<PortableMap, FormatError> {
    let content = std::fs::read_to_string(path)?;
    let map = from_json_str(&content)?;
    info!(
        "loaded map '{}' ({}x{}) from {}",
        map.name,
        map.width,
        map.height,
        path.display()
    );
    Ok(map)
}
