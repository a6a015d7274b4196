//! Layer types for the two fixed tile planes

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Cell;

/// The two named layers every grid carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Ground,
    Decoration,
}

impl LayerKind {
    /// Both layers, bottom to top
    pub const ALL: [LayerKind; 2] = [LayerKind::Ground, LayerKind::Decoration];

    /// Name used in exported documents
    pub fn name(self) -> &'static str {
        match self {
            LayerKind::Ground => "ground",
            LayerKind::Decoration => "decoration",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dense row-major layer of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub kind: LayerKind,
    /// Tile data - None means empty
    tiles: Vec<Option<Cell>>,
}

impl Layer {
    /// Create an empty layer sized for a `width` x `height` grid
    pub fn new(kind: LayerKind, width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            kind,
            tiles: vec![None; size],
        }
    }

    /// Row-major tile storage
    pub fn tiles(&self) -> &[Option<Cell>] {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Option<Cell>] {
        &mut self.tiles
    }

    /// Number of occupied cells
    pub fn non_empty_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layer_is_empty() {
        let layer = Layer::new(LayerKind::Ground, 10, 10);

        assert_eq!(layer.kind, LayerKind::Ground);
        assert_eq!(layer.tiles().len(), 100);
        assert!(layer.tiles().iter().all(|t| t.is_none()));
        assert_eq!(layer.non_empty_count(), 0);
    }

    #[test]
    fn test_layer_kind_names() {
        assert_eq!(LayerKind::Ground.name(), "ground");
        assert_eq!(LayerKind::Decoration.to_string(), "decoration");
        assert_eq!(
            serde_json::to_string(&LayerKind::Decoration).unwrap(),
            "\"decoration\""
        );
    }
}
