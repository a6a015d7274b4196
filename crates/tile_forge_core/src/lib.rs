//! Core data structures for tile_forge
//!
//! This crate provides the layered tile-grid engine:
//! - `TileGrid` - A fixed-size grid with `ground` and `decoration` layers
//! - `Cell` - A reference to a frame of a tileset, by key
//! - `TilesetRegistry` - Metadata of the currently loaded tilesets
//! - `Brush` / `Stamp` - Single-tile and multi-tile brushes
//! - `History` - Bounded stack of full-grid snapshots
//! - `TileEditor` - Placement, stamping, erase, pick, flood fill and undo/redo
//!
//! This crate has no Bevy dependency unless the `bevy` feature is enabled, in
//! which case `TileEditor` can be inserted as a resource.

mod brush;
mod cell;
mod edit;
mod grid;
mod history;
mod layer;
mod tileset;

pub use brush::{Brush, SourceTile, Stamp, StampTile};
pub use cell::Cell;
pub use edit::{FillHistory, GridChange, TileEditor};
pub use grid::{GridError, TileGrid, MAX_GRID_CELLS};
pub use history::{History, Snapshot, DEFAULT_HISTORY_CAPACITY};
pub use layer::{Layer, LayerKind};
pub use tileset::{TilesetRef, TilesetRegistry};
