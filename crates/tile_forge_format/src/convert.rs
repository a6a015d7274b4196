//! Conversion between [`TileGrid`] and [`PortableMap`]

use tile_forge_core::{Cell, LayerKind, TileGrid, TilesetRef, TilesetRegistry};

use crate::validate::{resolve_tileset_key, validate_map};
use crate::{
    FormatError, PortableCell, PortableLayers, PortableMap, PortableTileset, DEFAULT_TILE_SIZE,
    FORMAT_VERSION,
};

/// Caller-supplied document metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub name: String,
    /// Overrides the tile size taken from the first registry entry
    pub tile_size: Option<u32>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            tile_size: None,
        }
    }
}

impl ExportOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tile_size: None,
        }
    }
}

/// A document decoded back into a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedMap {
    pub name: String,
    pub tile_size: u32,
    pub tilesets: Vec<PortableTileset>,
    pub grid: TileGrid,
}

impl ImportedMap {
    /// Registry entries for the embedded tilesets, in document order
    pub fn registry(&self) -> TilesetRegistry {
        self.tilesets
            .iter()
            .map(|t| TilesetRef::new(t.key.clone(), t.cols, t.rows, self.tile_size))
            .collect()
    }
}

/// File name recorded for a tileset in exported documents
pub fn tileset_file_name(key: &str) -> String {
    format!("{key}.png")
}

/// Build a portable document from a grid and the loaded tilesets.
///
/// The document's `tilesets` array is the registry in registry order, and
/// each cell stores its tileset's position in that array. A cell whose key is
/// not loaded fails with [`FormatError::MissingTilesetReference`].
pub fn to_portable(
    grid: &TileGrid,
    registry: &TilesetRegistry,
    options: &ExportOptions,
) -> Result<PortableMap, FormatError> {
    let tilesets = registry
        .iter()
        .map(|t| PortableTileset {
            key: t.key.clone(),
            file: tileset_file_name(&t.key),
            cols: t.cols,
            rows: t.rows,
        })
        .collect();

    let tile_size = options
        .tile_size
        .or_else(|| registry.iter().next().map(|t| t.tile_size))
        .unwrap_or(DEFAULT_TILE_SIZE);

    let mut layers = PortableLayers::default();
    for kind in LayerKind::ALL {
        *layers.get_mut(kind) = encode_layer(grid, registry, kind)?;
    }

    Ok(PortableMap {
        name: options.name.clone(),
        version: Some(FORMAT_VERSION.to_string()),
        width: grid.width(),
        height: grid.height(),
        tile_size,
        tilesets,
        layers,
    })
}

fn encode_layer(
    grid: &TileGrid,
    registry: &TilesetRegistry,
    kind: LayerKind,
) -> Result<Vec<Vec<PortableCell>>, FormatError> {
    let mut rows = Vec::with_capacity(grid.height() as usize);
    for y in 0..grid.height() {
        let mut row = Vec::with_capacity(grid.width() as usize);
        for x in 0..grid.width() {
            let encoded = match grid.get(kind, x as i32, y as i32) {
                None => PortableCell::Empty,
                Some(cell) => {
                    let tileset = registry.index_of(&cell.tileset_key).ok_or_else(|| {
                        FormatError::MissingTilesetReference {
                            key: cell.tileset_key.clone(),
                            layer: kind,
                            x,
                            y,
                        }
                    })?;
                    PortableCell::Tile {
                        tileset,
                        frame: cell.frame,
                    }
                }
            };
            row.push(encoded);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Rebuild a grid from a portable document.
///
/// Fails on a missing or unknown `version`, zero or oversized dimensions,
/// layer matrices that do not match the declared size, or a tileset index
/// outside the embedded `tilesets` array. The whole document is checked
/// before the grid is allocated.
pub fn from_portable(map: &PortableMap) -> Result<ImportedMap, FormatError> {
    validate_map(map)?;
    let mut grid = TileGrid::new(map.width, map.height)?;

    for kind in LayerKind::ALL {
        for (y, row) in map.layers.get(kind).iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let PortableCell::Tile { tileset, frame } = *cell else {
                    continue;
                };
                let key = resolve_tileset_key(&map.tilesets, tileset, kind, x as u32, y as u32)?;
                grid.set(kind, x as i32, y as i32, Some(Cell::new(key, frame)));
            }
        }
    }

    Ok(ImportedMap {
        name: map.name.clone(),
        tile_size: map.tile_size,
        tilesets: map.tilesets.clone(),
        grid,
    })
}
