//! Tileset references and the registry of loaded tilesets
//!
//! Image decoding and frame slicing live outside this crate. The registry only
//! carries the metadata cells and exports need.

use serde::{Deserialize, Serialize};

/// Metadata for one loaded tileset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TilesetRef {
    pub key: String,
    pub cols: u32,
    pub rows: u32,
    /// Tile size in pixels (square tiles)
    pub tile_size: u32,
    pub display_name: String,
}

impl TilesetRef {
    pub fn new(key: impl Into<String>, cols: u32, rows: u32, tile_size: u32) -> Self {
        let key = key.into();
        Self {
            display_name: key.clone(),
            key,
            cols,
            rows,
            tile_size,
        }
    }

    /// Set the human-readable name
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }
}

/// Ordered set of loaded tilesets, unique by key.
///
/// Order is load order, which is also the order tilesets are written to
/// exported documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetRegistry {
    tilesets: Vec<TilesetRef>,
}

impl TilesetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tileset. A tileset with the same key is replaced in place.
    pub fn insert(&mut self, tileset: TilesetRef) {
        match self.tilesets.iter_mut().find(|t| t.key == tileset.key) {
            Some(existing) => *existing = tileset,
            None => self.tilesets.push(tileset),
        }
    }

    /// Unload a tileset. Cells referencing it are left untouched.
    pub fn remove(&mut self, key: &str) -> Option<TilesetRef> {
        let idx = self.index_of(key)?;
        Some(self.tilesets.remove(idx))
    }

    pub fn get(&self, key: &str) -> Option<&TilesetRef> {
        self.tilesets.iter().find(|t| t.key == key)
    }

    /// Position of a key in registry order
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.tilesets.iter().position(|t| t.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TilesetRef> {
        self.tilesets.iter()
    }

    pub fn len(&self) -> usize {
        self.tilesets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tilesets.is_empty()
    }
}

impl FromIterator<TilesetRef> for TilesetRegistry {
    fn from_iter<I: IntoIterator<Item = TilesetRef>>(iter: I) -> Self {
        let mut registry = Self::new();
        for tileset in iter {
            registry.insert(tileset);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_replaces_by_key() {
        let mut registry = TilesetRegistry::new();
        registry.insert(TilesetRef::new("terrain", 8, 8, 32));
        registry.insert(TilesetRef::new("props", 4, 2, 16));
        registry.insert(TilesetRef::new("terrain", 10, 10, 32).with_display_name("Terrain v2"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.index_of("terrain"), Some(0));
        assert_eq!(registry.index_of("props"), Some(1));
        assert_eq!(registry.get("terrain").map(|t| t.cols), Some(10));
        assert_eq!(
            registry.get("terrain").map(|t| t.display_name.as_str()),
            Some("Terrain v2")
        );
    }

    #[test]
    fn test_remove_shifts_positions() {
        let mut registry: TilesetRegistry = [
            TilesetRef::new("a", 1, 1, 16),
            TilesetRef::new("b", 1, 1, 16),
        ]
        .into_iter()
        .collect();

        assert!(registry.remove("a").is_some());
        assert!(registry.remove("a").is_none());
        assert_eq!(registry.index_of("b"), Some(0));
        assert!(!registry.contains("a"));
    }
}
