//! Document validation for import

use tile_forge_core::{LayerKind, TileGrid};

use crate::{FormatError, PortableCell, PortableMap, PortableTileset, FORMAT_VERSION};

/// Reject documents whose `version` is missing or not [`FORMAT_VERSION`]
pub fn validate_version(version: Option<&str>) -> Result<(), FormatError> {
    match version {
        Some(FORMAT_VERSION) => Ok(()),
        other => Err(FormatError::UnsupportedFormatVersion {
            found: other.map(str::to_string),
        }),
    }
}

/// Check that a layer matrix matches the declared dimensions.
///
/// An absent (empty) matrix is accepted and imports as an empty layer.
pub fn validate_layer_shape(map: &PortableMap, kind: LayerKind) -> Result<(), FormatError> {
    let matrix = map.layers.get(kind);
    if matrix.is_empty() {
        return Ok(());
    }
    if matrix.len() != map.height as usize {
        return Err(FormatError::LayerShapeMismatch {
            layer: kind,
            reason: format!("{} rows, expected {}", matrix.len(), map.height),
        });
    }
    if let Some((y, row)) = matrix
        .iter()
        .enumerate()
        .find(|(_, row)| row.len() != map.width as usize)
    {
        return Err(FormatError::LayerShapeMismatch {
            layer: kind,
            reason: format!("row {} has {} cells, expected {}", y, row.len(), map.width),
        });
    }
    Ok(())
}

/// Resolve a positional tileset index to its stable key
pub fn resolve_tileset_key<'a>(
    tilesets: &'a [PortableTileset],
    index: usize,
    layer: LayerKind,
    x: u32,
    y: u32,
) -> Result<&'a str, FormatError> {
    tilesets
        .get(index)
        .map(|t| t.key.as_str())
        .ok_or(FormatError::TilesetIndexOutOfRange {
            index,
            count: tilesets.len(),
            layer,
            x,
            y,
        })
}

/// Validate a whole document without building a grid
pub fn validate_map(map: &PortableMap) -> Result<(), FormatError> {
    validate_version(map.version.as_deref())?;
    TileGrid::check_dimensions(map.width, map.height)?;
    for kind in LayerKind::ALL {
        validate_layer_shape(map, kind)?;
        for (y, row) in map.layers.get(kind).iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let PortableCell::Tile { tileset, .. } = cell {
                    resolve_tileset_key(&map.tilesets, *tileset, kind, x as u32, y as u32)?;
                }
            }
        }
    }
    Ok(())
}
