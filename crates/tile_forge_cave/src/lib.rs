//! Procedural cave generation for tile_forge.
//!
//! [`generate_cave`] runs a cellular automaton over a caller-supplied random
//! number generator and returns a [`CaveGrid`]. [`CavePlacement`] then writes
//! that grid into a [`TileEditor`](tile_forge_core::TileEditor) in fixed-size
//! batches so the host's frame loop is not blocked.
//!
//! This crate has no Bevy dependency. It operates on plain data from `tile_forge_core`.

mod apply;
mod generate;
mod types;

pub use apply::{CavePlacement, CaveProgress, DEFAULT_BATCH_SIZE};
pub use generate::generate_cave;
pub use types::{
    CaveCell, CaveGrid, CaveParams, CaveTiles, DEFAULT_ITERATIONS, DEFAULT_WALL_PROBABILITY,
    WALL_NEIGHBOUR_THRESHOLD,
};
