//! Data types for cave generation and placement.

use serde::{Deserialize, Serialize};
use tile_forge_core::Cell;

// ─── Parameters ──────────────────────────────────────────────────────────────

/// Default probability that a cell starts as wall.
pub const DEFAULT_WALL_PROBABILITY: f64 = 0.46;

/// Default number of smoothing passes.
pub const DEFAULT_ITERATIONS: u32 = 5;

/// A cell becomes wall when at least this many of its 8 neighbours are walls.
pub const WALL_NEIGHBOUR_THRESHOLD: u8 = 5;

/// Tuning for [`generate_cave`](crate::generate_cave).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveParams {
    /// Chance in `[0, 1]` that a cell is seeded as wall. Out-of-range values are clamped.
    pub wall_probability: f64,
    /// Number of majority-rule smoothing passes.
    pub iterations: u32,
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            wall_probability: DEFAULT_WALL_PROBABILITY,
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

// ─── Grid ────────────────────────────────────────────────────────────────────

/// One cell of a generated cave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CaveCell {
    Floor = 0,
    Wall = 1,
}

impl CaveCell {
    pub fn is_wall(self) -> bool {
        self == CaveCell::Wall
    }
}

/// A `height` x `width` matrix of floor/wall cells.
///
/// Produced by [`generate_cave`](crate::generate_cave) and consumed right away
/// by a [`CavePlacement`](crate::CavePlacement); never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaveGrid {
    width: u32,
    height: u32,
    /// Row-major cells.
    cells: Vec<CaveCell>,
}

impl CaveGrid {
    /// An all-wall grid.
    pub(crate) fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![CaveCell::Wall; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell at `(x, y)`, or `None` out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<CaveCell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(self.index(x, y)).copied()
    }

    pub(crate) fn set(&mut self, x: u32, y: u32, cell: CaveCell) {
        let idx = self.index(x, y);
        if let Some(slot) = self.cells.get_mut(idx) {
            *slot = cell;
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Whether `(x, y)` lies on the outer ring.
    pub fn is_border(&self, x: u32, y: u32) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Rows as `0` (floor) / `1` (wall) values.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height as usize];
        }
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|&c| c as u8).collect())
            .collect()
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }

    /// Iterate all cells row-major as `(x, y, cell)`.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, CaveCell)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &cell)| (idx as u32 % width, idx as u32 / width, cell))
    }
}

// ─── Placement ───────────────────────────────────────────────────────────────

/// Tiles written for each cave cell kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaveTiles {
    pub wall: Cell,
    /// `None` clears floor cells.
    pub floor: Option<Cell>,
}

impl CaveTiles {
    pub fn for_cell(&self, cell: CaveCell) -> Option<Cell> {
        match cell {
            CaveCell::Wall => Some(self.wall.clone()),
            CaveCell::Floor => self.floor.clone(),
        }
    }
}
