//! Tileset-library exchange documents
//!
//! These are produced and consumed by the library persistence layer. This
//! crate only gives them a typed shape; image data and dates are carried as
//! opaque strings.

use serde::{Deserialize, Serialize};
use tile_forge_core::{TilesetRef, TilesetRegistry};

use crate::FormatError;

/// A shared bundle of tilesets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TilesetLibrary {
    pub version: serde_json::Value,
    #[serde(default)]
    pub export_date: String,
    #[serde(default)]
    pub tilesets: Vec<LibraryTileset>,
}

/// One tileset in a library bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryTileset {
    pub id: String,
    pub name: String,
    /// Encoded image (typically a data URL); never decoded here
    pub image_data: String,
    pub cols: u32,
    pub rows: u32,
    pub tile_size: u32,
    #[serde(default)]
    pub added_date: String,
}

impl LibraryTileset {
    /// Registry entry for this tileset, keyed by its library id
    pub fn to_tileset_ref(&self) -> TilesetRef {
        TilesetRef::new(self.id.clone(), self.cols, self.rows, self.tile_size)
            .with_display_name(self.name.clone())
    }
}

impl TilesetLibrary {
    /// Registry entries for every tileset in the bundle
    pub fn registry(&self) -> TilesetRegistry {
        self.tilesets.iter().map(LibraryTileset::to_tileset_ref).collect()
    }
}

/// Parse a library bundle from JSON
pub fn parse_library(json: &str) -> Result<TilesetLibrary, FormatError> {
    Ok(serde_json::from_str(json)?)
}
