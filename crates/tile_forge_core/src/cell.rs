//! Cell references into the tileset registry

use serde::{Deserialize, Serialize};
use std::fmt;

/// One occupied grid position: a tileset key plus a frame index within that tileset.
///
/// The grid never dereferences the key. A cell may point at a tileset that is
/// not (or no longer) loaded; such cells are kept and exported as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub tileset_key: String,
    pub frame: u32,
}

impl Cell {
    pub fn new(tileset_key: impl Into<String>, frame: u32) -> Self {
        Self {
            tileset_key: tileset_key.into(),
            frame,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.tileset_key, self.frame)
    }
}
