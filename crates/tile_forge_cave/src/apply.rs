//! The placement driver: writes a [`CaveGrid`] into a [`TileEditor`] a batch at a time.
//!
//! A full-map rewrite can touch tens of thousands of cells. The host calls
//! [`CavePlacement::step`] once per frame; each call places at most
//! `batch_size` cells and returns, so rendering keeps running between batches.

use tile_forge_core::{LayerKind, TileEditor};
use tracing::debug;

use crate::{CaveGrid, CaveTiles};

/// Default number of cells placed per [`CavePlacement::step`].
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Result of one placement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaveProgress {
    /// More cells remain; call `step` again on the next tick.
    Pending { placed: usize, total: usize },
    /// Every cell has been placed.
    Done { total: usize },
}

impl CaveProgress {
    pub fn is_done(&self) -> bool {
        matches!(self, CaveProgress::Done { .. })
    }
}

/// An in-flight cave placement.
///
/// The whole placement is one undo step: a snapshot is pushed before the
/// first batch is written. Placement cannot be cancelled once started.
#[derive(Debug, Clone)]
pub struct CavePlacement {
    cave: CaveGrid,
    layer: LayerKind,
    tiles: CaveTiles,
    batch_size: usize,
    cursor: usize,
    started: bool,
}

impl CavePlacement {
    pub fn new(cave: CaveGrid, layer: LayerKind, tiles: CaveTiles) -> Self {
        Self {
            cave,
            layer,
            tiles,
            batch_size: DEFAULT_BATCH_SIZE,
            cursor: 0,
            started: false,
        }
    }

    /// Cells per step (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn total(&self) -> usize {
        self.cave.width() as usize * self.cave.height() as usize
    }

    pub fn placed(&self) -> usize {
        self.cursor
    }

    pub fn is_done(&self) -> bool {
        self.started && self.cursor >= self.total()
    }

    /// Place the next batch of cells.
    ///
    /// Cells are visited row-major. Cave cells outside the editor's grid are skipped.
    pub fn step(&mut self, editor: &mut TileEditor) -> CaveProgress {
        let total = self.total();
        if !self.started {
            editor.push_snapshot();
            self.started = true;
        }

        let width = self.cave.width().max(1) as usize;
        let end = (self.cursor + self.batch_size).min(total);
        for idx in self.cursor..end {
            let x = (idx % width) as u32;
            let y = (idx / width) as u32;
            if let Some(cell) = self.cave.get(x, y) {
                editor.write_cell(self.layer, x as i32, y as i32, self.tiles.for_cell(cell));
            }
        }
        self.cursor = end;

        if self.cursor >= total {
            debug!("cave placement finished: {} cells on {}", total, self.layer);
            CaveProgress::Done { total }
        } else {
            debug!("cave placement: {}/{} cells", self.cursor, total);
            CaveProgress::Pending {
                placed: self.cursor,
                total,
            }
        }
    }

    /// Step until done. For hosts without a frame loop (tests, the CLI).
    pub fn run_to_completion(&mut self, editor: &mut TileEditor) -> usize {
        let mut steps = 0;
        loop {
            steps += 1;
            if self.step(editor).is_done() {
                return steps;
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate_cave, CaveCell, CaveParams};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use tile_forge_core::{Cell, TileGrid};

    fn tiles() -> CaveTiles {
        CaveTiles {
            wall: Cell::new("cave", 1),
            floor: Some(Cell::new("cave", 0)),
        }
    }

    fn cave(width: u32, height: u32) -> CaveGrid {
        generate_cave(width, height, &CaveParams::default(), &mut SmallRng::seed_from_u64(11))
    }

    #[test]
    fn places_in_batches_until_done() {
        let mut editor = TileEditor::new(TileGrid::new(40, 30).unwrap());
        let mut placement = CavePlacement::new(cave(40, 30), LayerKind::Ground, tiles());

        assert_eq!(
            placement.step(&mut editor),
            CaveProgress::Pending {
                placed: 500,
                total: 1200
            }
        );
        assert_eq!(editor.grid().cell_count(LayerKind::Ground), 500);
        assert_eq!(
            placement.step(&mut editor),
            CaveProgress::Pending {
                placed: 1000,
                total: 1200
            }
        );
        assert_eq!(placement.step(&mut editor), CaveProgress::Done { total: 1200 });
        assert!(placement.is_done());
        assert_eq!(editor.grid().cell_count(LayerKind::Ground), 1200);
    }

    #[test]
    fn placed_cells_mirror_the_cave() {
        let cave = cave(12, 9);
        let mut editor = TileEditor::new(TileGrid::new(12, 9).unwrap());
        let mut placement = CavePlacement::new(cave.clone(), LayerKind::Ground, tiles()).with_batch_size(7);
        placement.run_to_completion(&mut editor);

        for (x, y, cell) in cave.iter() {
            let expected = match cell {
                CaveCell::Wall => Cell::new("cave", 1),
                CaveCell::Floor => Cell::new("cave", 0),
            };
            assert_eq!(editor.pick(LayerKind::Ground, x as i32, y as i32), Some(expected));
        }
    }

    #[test]
    fn whole_placement_is_one_undo_step() {
        let mut editor = TileEditor::new(TileGrid::new(20, 20).unwrap());
        let mut placement = CavePlacement::new(cave(20, 20), LayerKind::Ground, tiles()).with_batch_size(50);
        let steps = placement.run_to_completion(&mut editor);

        assert_eq!(steps, 8);
        assert_eq!(editor.history().len(), 1);
        assert!(editor.undo());
        assert!(editor.grid().is_empty());
    }

    #[test]
    fn empty_floor_clears_cells_and_oversized_caves_are_clipped() {
        let mut editor = TileEditor::new(TileGrid::new(5, 5).unwrap());
        for y in 0..5 {
            for x in 0..5 {
                editor.write_cell(LayerKind::Decoration, x, y, Some(Cell::new("old", 0)));
            }
        }
        let tiles = CaveTiles {
            wall: Cell::new("cave", 1),
            floor: None,
        };
        let cave = cave(10, 10);
        let mut placement = CavePlacement::new(cave.clone(), LayerKind::Decoration, tiles);
        placement.run_to_completion(&mut editor);

        for y in 0..5u32 {
            for x in 0..5u32 {
                let picked = editor.pick(LayerKind::Decoration, x as i32, y as i32);
                match cave.get(x, y) {
                    Some(CaveCell::Wall) => assert_eq!(picked, Some(Cell::new("cave", 1))),
                    _ => assert_eq!(picked, None),
                }
            }
        }
    }
}
