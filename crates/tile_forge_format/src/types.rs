//! The portable map document
//!
//! ```json
//! { "name": "...", "version": "1.0", "width": 3, "height": 2, "tileSize": 32,
//!   "tilesets": [{ "key": "terrain", "file": "terrain.png", "cols": 8, "rows": 8 }],
//!   "layers": { "ground": [[0, [0, 5], 0], [0, 0, 0]], "decoration": [...] } }
//! ```
//!
//! Cells are `0` when empty or `[tilesetIndex, frame]`, where `tilesetIndex` is
//! a position in this document's own `tilesets` array.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use tile_forge_core::LayerKind;

/// The only format version this crate reads and writes
pub const FORMAT_VERSION: &str = "1.0";

/// Tile size written when neither the caller nor the registry supplies one
pub const DEFAULT_TILE_SIZE: u32 = 32;

/// A complete exported map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortableMap {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub width: u32,
    pub height: u32,
    pub tile_size: u32,
    #[serde(default)]
    pub tilesets: Vec<PortableTileset>,
    #[serde(default)]
    pub layers: PortableLayers,
}

/// A tileset entry embedded in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortableTileset {
    pub key: String,
    pub file: String,
    pub cols: u32,
    pub rows: u32,
}

/// Cell matrices, one row per grid row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortableLayers {
    #[serde(default)]
    pub ground: Vec<Vec<PortableCell>>,
    #[serde(default)]
    pub decoration: Vec<Vec<PortableCell>>,
}

impl PortableLayers {
    pub fn get(&self, kind: LayerKind) -> &[Vec<PortableCell>] {
        match kind {
            LayerKind::Ground => &self.ground,
            LayerKind::Decoration => &self.decoration,
        }
    }

    pub fn get_mut(&mut self, kind: LayerKind) -> &mut Vec<Vec<PortableCell>> {
        match kind {
            LayerKind::Ground => &mut self.ground,
            LayerKind::Decoration => &mut self.decoration,
        }
    }
}

/// One encoded cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortableCell {
    /// Written as `0`
    Empty,
    /// Written as `[tileset, frame]`
    Tile { tileset: usize, frame: u32 },
}

impl Serialize for PortableCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            PortableCell::Empty => serializer.serialize_u8(0),
            PortableCell::Tile { tileset, frame } => (tileset, frame).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PortableCell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Pair(usize, u32),
            Scalar(u64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Scalar(0) => Ok(PortableCell::Empty),
            Raw::Scalar(other) => Err(de::Error::custom(format!(
                "invalid cell value {other}: expected 0 or [tileset, frame]"
            ))),
            Raw::Pair(tileset, frame) => Ok(PortableCell::Tile { tileset, frame }),
        }
    }
}
