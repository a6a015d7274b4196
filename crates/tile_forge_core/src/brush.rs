//! Brushes: a single cell or a multi-tile stamp
//!
//! Stamps picked from a tileset sheet arrive as absolute sheet positions.
//! They are normalized here into offsets relative to the selection's top-left
//! corner, so placement never depends on the source sheet's layout.

use serde::{Deserialize, Serialize};

use crate::Cell;

/// A tile selected from a tileset sheet at `(col, row)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTile {
    pub tileset_key: String,
    pub frame: u32,
    pub col: u32,
    pub row: u32,
}

/// One tile of a stamp, offset from the stamp's anchor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampTile {
    pub dx: u32,
    pub dy: u32,
    pub cell: Cell,
}

/// A multi-tile brush as ordered `(dx, dy, cell)` triples, row-major
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    tiles: Vec<StampTile>,
}

impl Stamp {
    /// A 1x1 stamp
    pub fn single(cell: Cell) -> Self {
        Self {
            tiles: vec![StampTile { dx: 0, dy: 0, cell }],
        }
    }

    /// Build a stamp from absolute sheet selections.
    ///
    /// Offsets are measured from the minimum column and row of the selection.
    /// When two source tiles share a position the later one wins.
    pub fn from_source_tiles(source: &[SourceTile]) -> Self {
        let Some(min_col) = source.iter().map(|t| t.col).min() else {
            return Self::default();
        };
        let min_row = source.iter().map(|t| t.row).min().unwrap_or(0);

        let mut tiles: Vec<StampTile> = Vec::with_capacity(source.len());
        for tile in source {
            let dx = tile.col - min_col;
            let dy = tile.row - min_row;
            let cell = Cell::new(tile.tileset_key.clone(), tile.frame);
            match tiles.iter_mut().find(|t| t.dx == dx && t.dy == dy) {
                Some(existing) => existing.cell = cell,
                None => tiles.push(StampTile { dx, dy, cell }),
            }
        }
        tiles.sort_by_key(|t| (t.dy, t.dx));
        Self { tiles }
    }

    /// Build a stamp from already-relative triples
    pub fn from_offsets(offsets: impl IntoIterator<Item = (u32, u32, Cell)>) -> Self {
        let mut tiles: Vec<StampTile> = offsets
            .into_iter()
            .map(|(dx, dy, cell)| StampTile { dx, dy, cell })
            .collect();
        tiles.sort_by_key(|t| (t.dy, t.dx));
        Self { tiles }
    }

    pub fn tiles(&self) -> &[StampTile] {
        &self.tiles
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }
}

/// The active brush
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Brush {
    Single(Cell),
    Stamp(Stamp),
}

impl Brush {
    /// Normalize a palette selection: one tile becomes `Single`, more become a `Stamp`
    pub fn from_selection(source: &[SourceTile]) -> Option<Self> {
        match source {
            [] => None,
            [tile] => Some(Brush::Single(Cell::new(tile.tileset_key.clone(), tile.frame))),
            _ => Some(Brush::Stamp(Stamp::from_source_tiles(source))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(col: u32, row: u32) -> SourceTile {
        SourceTile {
            tileset_key: "sheet".to_string(),
            frame: row * 10 + col,
            col,
            row,
        }
    }

    #[test]
    fn test_offsets_relative_to_selection_corner() {
        let stamp = Stamp::from_source_tiles(&[source(4, 3), source(3, 2), source(3, 3)]);

        let offsets: Vec<_> = stamp.tiles().iter().map(|t| (t.dx, t.dy, t.cell.frame)).collect();
        assert_eq!(offsets, vec![(0, 0, 23), (0, 1, 33), (1, 1, 34)]);
    }

    #[test]
    fn test_empty_selection() {
        assert!(Stamp::from_source_tiles(&[]).is_empty());
        assert_eq!(Brush::from_selection(&[]), None);
    }

    #[test]
    fn test_single_selection_becomes_single_brush() {
        assert_eq!(
            Brush::from_selection(&[source(5, 1)]),
            Some(Brush::Single(Cell::new("sheet", 15)))
        );
    }

    #[test]
    fn test_duplicate_positions_collapse() {
        let mut second = source(0, 0);
        second.frame = 99;
        let stamp = Stamp::from_source_tiles(&[source(0, 0), second]);
        assert_eq!(stamp.len(), 1);
        assert_eq!(stamp.tiles()[0].cell.frame, 99);
    }
}
