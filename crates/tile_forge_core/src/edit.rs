//! Editing operations with undo/redo
//!
//! [`TileEditor`] owns the grid and its history. Every mutating operation
//! snapshots the grid into the undo stack before changing it, and records
//! which cells changed so a renderer can pull updates with
//! [`TileEditor::drain_changes`].

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Brush, Cell, History, LayerKind, Stamp, TileGrid};

/// How a flood fill is recorded in the undo history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillHistory {
    /// One snapshot before the fill; one undo reverts the whole region
    #[default]
    Atomic,
    /// One snapshot per replaced cell, like repeated single placements.
    /// Large fills push earlier history out of the bounded stack.
    PerCell,
}

/// A change the renderer should pick up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridChange {
    /// One cell was written
    Cell { layer: LayerKind, x: u32, y: u32 },
    /// The whole grid was rebuilt (undo/redo)
    Full,
}

/// The tile grid plus its undo/redo stacks
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
#[derive(Debug, Clone)]
pub struct TileEditor {
    grid: TileGrid,
    undo_stack: History,
    redo_stack: History,
    fill_history: FillHistory,
    changes: Vec<GridChange>,
}

impl TileEditor {
    /// Wrap a grid with a default-capacity history
    pub fn new(grid: TileGrid) -> Self {
        Self {
            grid,
            undo_stack: History::default(),
            redo_stack: History::default(),
            fill_history: FillHistory::default(),
            changes: Vec::new(),
        }
    }

    /// Replace the undo/redo stacks with ones of the given capacity
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.undo_stack = History::with_capacity(capacity);
        self.redo_stack = History::with_capacity(capacity);
        self
    }

    pub fn with_fill_history(mut self, fill_history: FillHistory) -> Self {
        self.fill_history = fill_history;
        self
    }

    /// Read-only access for renderers
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// The undo stack
    pub fn history(&self) -> &History {
        &self.undo_stack
    }

    pub fn fill_history(&self) -> FillHistory {
        self.fill_history
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Swap in a new grid (e.g. after an import), dropping all history
    pub fn replace_grid(&mut self, grid: TileGrid) {
        self.grid = grid;
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.record_change(GridChange::Full);
    }

    /// Record the current grid as an undo step. A new edit invalidates redo.
    pub fn push_snapshot(&mut self) {
        self.undo_stack.push(self.grid.snapshot());
        self.redo_stack.clear();
    }

    /// Write a cell without touching history. Returns whether the coordinate was in bounds.
    ///
    /// Pair with [`push_snapshot`](Self::push_snapshot) for multi-cell
    /// operations that should undo as one step.
    pub fn write_cell(&mut self, layer: LayerKind, x: i32, y: i32, cell: Option<Cell>) -> bool {
        if !self.grid.in_bounds(x, y) {
            return false;
        }
        self.grid.set(layer, x, y, cell);
        self.record_change(GridChange::Cell {
            layer,
            x: x as u32,
            y: y as u32,
        });
        true
    }

    /// Append to the change log. Once a full rebuild is pending, or the log
    /// outgrows one entry per cell of a layer, it collapses to a single
    /// [`GridChange::Full`].
    fn record_change(&mut self, change: GridChange) {
        if self.changes.last() == Some(&GridChange::Full) {
            return;
        }
        let cells = self.grid.width() as usize * self.grid.height() as usize;
        if change == GridChange::Full || self.changes.len() >= cells {
            self.changes.clear();
            self.changes.push(GridChange::Full);
        } else {
            self.changes.push(change);
        }
    }

    /// Snapshot then write: the single-placement path
    fn record_and_write(&mut self, layer: LayerKind, x: i32, y: i32, cell: Option<Cell>) {
        self.push_snapshot();
        self.write_cell(layer, x, y, cell);
    }

    /// Place one tile. Always one undo step when in bounds, even if the cell
    /// already holds the same tile.
    pub fn paint_single(&mut self, layer: LayerKind, x: i32, y: i32, cell: Cell) -> bool {
        if !self.grid.in_bounds(x, y) {
            return false;
        }
        self.record_and_write(layer, x, y, Some(cell));
        true
    }

    /// Place a stamp with its top-left offset at `(anchor_x, anchor_y)`.
    ///
    /// Only cells whose content differs are written, each through the
    /// single-placement path. Returns the number of cells written.
    pub fn place_stamp(&mut self, layer: LayerKind, anchor_x: i32, anchor_y: i32, stamp: &Stamp) -> usize {
        let mut written = 0;
        for tile in stamp.tiles() {
            let (Ok(dx), Ok(dy)) = (i32::try_from(tile.dx), i32::try_from(tile.dy)) else {
                continue;
            };
            let x = anchor_x.saturating_add(dx);
            let y = anchor_y.saturating_add(dy);
            if !self.grid.in_bounds(x, y) {
                continue;
            }
            if self.grid.get(layer, x, y) == Some(&tile.cell) {
                continue;
            }
            self.record_and_write(layer, x, y, Some(tile.cell.clone()));
            written += 1;
        }
        written
    }

    /// Apply the active brush at a coordinate. Returns the number of cells written.
    pub fn apply_brush(&mut self, layer: LayerKind, x: i32, y: i32, brush: &Brush) -> usize {
        match brush {
            Brush::Single(cell) => usize::from(self.paint_single(layer, x, y, cell.clone())),
            Brush::Stamp(stamp) => self.place_stamp(layer, x, y, stamp),
        }
    }

    /// Clear a cell. Erasing empty space records nothing.
    pub fn erase(&mut self, layer: LayerKind, x: i32, y: i32) -> bool {
        if self.grid.get(layer, x, y).is_none() {
            return false;
        }
        self.record_and_write(layer, x, y, None);
        true
    }

    /// Read a cell as a candidate brush
    pub fn pick(&self, layer: LayerKind, x: i32, y: i32) -> Option<Cell> {
        self.grid.get(layer, x, y).cloned()
    }

    /// Replace the 4-connected region of cells equal to the one at `(x, y)`.
    ///
    /// Cells match on tileset key and frame; empty cells form their own class.
    /// Filling a region with its own class is a no-op. Returns the number of
    /// cells replaced.
    pub fn flood_fill(&mut self, layer: LayerKind, x: i32, y: i32, replacement: Option<Cell>) -> usize {
        if !self.grid.in_bounds(x, y) {
            return 0;
        }
        let target = self.grid.get(layer, x, y).cloned();
        if target == replacement {
            return 0;
        }

        let region = self.collect_region(layer, x, y, target.as_ref());
        debug!(
            "flood fill on {} from ({}, {}): {} cells",
            layer,
            x,
            y,
            region.len()
        );

        match self.fill_history {
            FillHistory::Atomic => {
                self.push_snapshot();
                for &(cx, cy) in &region {
                    self.write_cell(layer, cx, cy, replacement.clone());
                }
            }
            FillHistory::PerCell => {
                for &(cx, cy) in &region {
                    self.record_and_write(layer, cx, cy, replacement.clone());
                }
            }
        }
        region.len()
    }

    /// Breadth-first walk of the region matching `target`, each cell visited once
    fn collect_region(&self, layer: LayerKind, x: i32, y: i32, target: Option<&Cell>) -> Vec<(i32, i32)> {
        let mut region = Vec::new();
        let mut visited: HashSet<(i32, i32)> = HashSet::new();
        let mut queue = VecDeque::new();

        visited.insert((x, y));
        queue.push_back((x, y));

        while let Some((cx, cy)) = queue.pop_front() {
            if self.grid.get(layer, cx, cy) != target {
                continue;
            }
            region.push((cx, cy));

            for (nx, ny) in [(cx - 1, cy), (cx + 1, cy), (cx, cy - 1), (cx, cy + 1)] {
                if self.grid.in_bounds(nx, ny) && visited.insert((nx, ny)) {
                    queue.push_back((nx, ny));
                }
            }
        }
        region
    }

    /// Restore the most recent snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(self.grid.snapshot());
        self.grid.restore(&snapshot);
        self.record_change(GridChange::Full);
        true
    }

    /// Re-apply the most recently undone step
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(self.grid.snapshot());
        self.grid.restore(&snapshot);
        self.record_change(GridChange::Full);
        true
    }

    /// Take all changes recorded since the last call
    pub fn drain_changes(&mut self) -> Vec<GridChange> {
        std::mem::take(&mut self.changes)
    }
}
