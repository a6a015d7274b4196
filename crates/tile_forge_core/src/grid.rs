//! The fixed-size two-layer tile grid
//!
//! Coordinates are signed so callers can pass positions projected from the
//! pointer or camera without clamping first. Anything outside
//! `0..width` x `0..height` reads as empty and ignores writes.

use thiserror::Error;

use crate::{Cell, Layer, LayerKind, Snapshot};

/// Upper bound on cells per layer (a 4096 x 4096 map)
pub const MAX_GRID_CELLS: u64 = 4096 * 4096;

/// Errors that can occur when constructing a grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}: both must be greater than zero")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("grid of {width}x{height} exceeds the limit of {max} cells per layer", max = MAX_GRID_CELLS)]
    TooLarge { width: u32, height: u32 },
}

/// Two layers of cells sharing one set of dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    ground: Layer,
    decoration: Layer,
}

impl TileGrid {
    /// Create an empty grid. Dimensions are fixed for the grid's lifetime.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        Self::check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            ground: Layer::new(LayerKind::Ground, width, height),
            decoration: Layer::new(LayerKind::Decoration, width, height),
        })
    }

    /// Check dimensions without allocating
    pub fn check_dimensions(width: u32, height: u32) -> Result<(), GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        if u64::from(width) * u64::from(height) > MAX_GRID_CELLS {
            return Err(GridError::TooLarge { width, height });
        }
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check whether a coordinate addresses a cell
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn layer(&self, kind: LayerKind) -> &Layer {
        match kind {
            LayerKind::Ground => &self.ground,
            LayerKind::Decoration => &self.decoration,
        }
    }

    fn layer_mut(&mut self, kind: LayerKind) -> &mut Layer {
        match kind {
            LayerKind::Ground => &mut self.ground,
            LayerKind::Decoration => &mut self.decoration,
        }
    }

    /// Read a cell. Out-of-bounds reads return `None`.
    pub fn get(&self, layer: LayerKind, x: i32, y: i32) -> Option<&Cell> {
        let idx = self.index(x, y)?;
        self.layer(layer).tiles()[idx].as_ref()
    }

    /// Write a cell (or clear it with `None`). Out-of-bounds writes are ignored.
    pub fn set(&mut self, layer: LayerKind, x: i32, y: i32, cell: Option<Cell>) {
        if let Some(idx) = self.index(x, y) {
            self.layer_mut(layer).tiles_mut()[idx] = cell;
        }
    }

    /// Deep copy of one layer's row-major storage
    pub fn clone_layer(&self, layer: LayerKind) -> Vec<Option<Cell>> {
        self.layer(layer).tiles().to_vec()
    }

    /// Empty every cell of a layer
    pub fn clear_layer(&mut self, layer: LayerKind) {
        self.layer_mut(layer)
            .tiles_mut()
            .iter_mut()
            .for_each(|t| *t = None);
    }

    /// Number of occupied cells on a layer
    pub fn cell_count(&self, layer: LayerKind) -> usize {
        self.layer(layer).non_empty_count()
    }

    /// True when neither layer holds any cell
    pub fn is_empty(&self) -> bool {
        LayerKind::ALL.iter().all(|&kind| self.cell_count(kind) == 0)
    }

    /// Capture both layers in full
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.clone_layer(LayerKind::Ground),
            self.clone_layer(LayerKind::Decoration),
        )
    }

    /// Rebuild both layers from a snapshot: clear, then set every coordinate.
    ///
    /// Positions the snapshot does not cover (a snapshot from a smaller grid)
    /// end up empty.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        for kind in LayerKind::ALL {
            self.clear_layer(kind);
            let source = snapshot.layer(kind);
            for y in 0..self.height as i32 {
                for x in 0..self.width as i32 {
                    let idx = y as usize * self.width as usize + x as usize;
                    let cell = source.get(idx).cloned().flatten();
                    self.set(kind, x, y, cell);
                }
            }
        }
    }

    /// Iterate over the occupied cells of a layer as `(x, y, cell)`
    pub fn iter_cells(&self, layer: LayerKind) -> impl Iterator<Item = (u32, u32, &Cell)> + '_ {
        let width = self.width;
        self.layer(layer)
            .tiles()
            .iter()
            .enumerate()
            .filter_map(move |(idx, tile)| {
                tile.as_ref()
                    .map(|cell| (idx as u32 % width, idx as u32 / width, cell))
            })
    }
}
