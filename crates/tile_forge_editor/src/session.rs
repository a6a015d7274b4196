//! An editing session: the editor, the loaded tilesets and any in-flight cave placement

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::Path;
use tile_forge_cave::{generate_cave, CavePlacement, CaveProgress, CaveTiles};
use tile_forge_core::{GridError, LayerKind, TileEditor, TileGrid, TilesetRef, TilesetRegistry};
use tile_forge_format::{from_portable, load_map, save_map, to_portable, FormatError, PortableMap};
use tracing::{debug, info};

use crate::config::EditorConfig;

/// Everything the host UI drives during one editing session
#[derive(Debug)]
pub struct EditorSession {
    editor: TileEditor,
    registry: TilesetRegistry,
    config: EditorConfig,
    cave: Option<CavePlacement>,
}

impl EditorSession {
    /// Start a session with an empty grid sized by the config
    pub fn new(config: EditorConfig) -> Result<Self, GridError> {
        let grid = TileGrid::new(config.grid_width, config.grid_height)?;
        Ok(Self {
            editor: Self::build_editor(grid, &config),
            registry: TilesetRegistry::new(),
            config,
            cave: None,
        })
    }

    fn build_editor(grid: TileGrid, config: &EditorConfig) -> TileEditor {
        TileEditor::new(grid)
            .with_history_capacity(config.history_capacity)
            .with_fill_history(config.fill_history)
    }

    pub fn editor(&self) -> &TileEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut TileEditor {
        &mut self.editor
    }

    pub fn registry(&self) -> &TilesetRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TilesetRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Whether a cave placement is still being written
    pub fn is_generating(&self) -> bool {
        self.cave.is_some()
    }

    /// Generate a cave sized to the grid and queue it for placement.
    ///
    /// Returns false if a previous placement is still running; placements
    /// cannot be cancelled, so the new one is not started.
    pub fn start_cave(&mut self, layer: LayerKind, tiles: CaveTiles, rng: &mut impl Rng) -> bool {
        if self.cave.is_some() {
            return false;
        }
        let grid = self.editor.grid();
        let cave = generate_cave(grid.width(), grid.height(), &self.config.cave.params(), rng);
        self.cave = Some(
            CavePlacement::new(cave, layer, tiles).with_batch_size(self.config.cave.batch_size),
        );
        info!("cave generation started on {}", layer);
        true
    }

    /// [`start_cave`](Self::start_cave) with a reproducible seed
    pub fn start_cave_seeded(&mut self, layer: LayerKind, tiles: CaveTiles, seed: u64) -> bool {
        let mut rng = SmallRng::seed_from_u64(seed);
        debug!("cave seed {}", seed);
        self.start_cave(layer, tiles, &mut rng)
    }

    /// Advance any in-flight placement by one batch. Call once per frame.
    pub fn tick(&mut self) -> Option<CaveProgress> {
        let placement = self.cave.as_mut()?;
        let progress = placement.step(&mut self.editor);
        if progress.is_done() {
            self.cave = None;
        }
        Some(progress)
    }

    /// Run any in-flight placement to the end
    pub fn finish_cave(&mut self) {
        while self.tick().is_some() {}
    }

    /// Export the grid with the loaded tilesets
    pub fn export(&self) -> Result<PortableMap, FormatError> {
        to_portable(self.editor.grid(), &self.registry, &self.config.export.options())
    }

    /// Replace the grid with an imported document.
    ///
    /// History is dropped and any in-flight cave placement is abandoned.
    /// Embedded tilesets that are not loaded yet are added to the registry;
    /// loaded ones keep their current metadata. A document that fails to
    /// import leaves the session untouched.
    pub fn import(&mut self, map: &PortableMap) -> Result<(), FormatError> {
        let imported = from_portable(map)?;
        if self.cave.take().is_some() {
            info!("cave placement abandoned by import");
        }
        for tileset in &imported.tilesets {
            if !self.registry.contains(&tileset.key) {
                self.registry.insert(TilesetRef::new(
                    tileset.key.clone(),
                    tileset.cols,
                    tileset.rows,
                    imported.tile_size,
                ));
            }
        }
        self.config.export.name = imported.name;
        self.editor.replace_grid(imported.grid);
        Ok(())
    }

    /// Export and write to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), FormatError> {
        save_map(&self.export()?, path)
    }

    /// Load a JSON file and import it
    pub fn open(&mut self, path: &Path) -> Result<(), FormatError> {
        let map = load_map(path)?;
        self.import(&map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_forge_core::Cell;

    fn config(width: u32, height: u32) -> EditorConfig {
        let mut config = EditorConfig::default();
        config.grid_width = width;
        config.grid_height = height;
        config
    }

    fn cave_tiles() -> CaveTiles {
        CaveTiles {
            wall: Cell::new("cave", 1),
            floor: Some(Cell::new("cave", 0)),
        }
    }

    #[test]
    fn new_session_uses_config() {
        let mut config = config(8, 6);
        config.history_capacity = 5;
        let session = EditorSession::new(config).unwrap();
        assert_eq!(session.editor().grid().width(), 8);
        assert_eq!(session.editor().grid().height(), 6);
        assert_eq!(session.editor().history().capacity(), 5);
        assert!(EditorSession::new(self::config(0, 4)).is_err());
    }

    #[test]
    fn cave_ticks_in_batches_and_blocks_restart() {
        let mut config = config(30, 30);
        config.cave.batch_size = 400;
        let mut session = EditorSession::new(config).unwrap();

        assert!(session.start_cave_seeded(LayerKind::Ground, cave_tiles(), 5));
        assert!(!session.start_cave_seeded(LayerKind::Ground, cave_tiles(), 6));

        assert!(matches!(session.tick(), Some(CaveProgress::Pending { placed: 400, .. })));
        assert!(matches!(session.tick(), Some(CaveProgress::Pending { placed: 800, .. })));
        assert_eq!(session.tick(), Some(CaveProgress::Done { total: 900 }));
        assert_eq!(session.tick(), None);
        assert!(!session.is_generating());
        assert_eq!(session.editor().grid().cell_count(LayerKind::Ground), 900);
    }

    #[test]
    fn seeded_caves_are_reproducible() {
        let mut a = EditorSession::new(config(20, 15)).unwrap();
        let mut b = EditorSession::new(config(20, 15)).unwrap();
        a.start_cave_seeded(LayerKind::Ground, cave_tiles(), 99);
        b.start_cave_seeded(LayerKind::Ground, cave_tiles(), 99);
        a.finish_cave();
        b.finish_cave();
        assert_eq!(a.editor().grid(), b.editor().grid());
    }

    #[test]
    fn save_and_open_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");

        let mut session = EditorSession::new(config(6, 4)).unwrap();
        session.registry_mut().insert(TilesetRef::new("terrain", 4, 4, 16));
        session
            .editor_mut()
            .paint_single(LayerKind::Decoration, 5, 3, Cell::new("terrain", 2));
        session.save(&path).unwrap();

        let mut other = EditorSession::new(config(2, 2)).unwrap();
        other.editor_mut().paint_single(LayerKind::Ground, 0, 0, Cell::new("x", 0));
        other.open(&path).unwrap();

        assert_eq!(other.editor().grid(), session.editor().grid());
        assert!(!other.editor().can_undo());
        assert_eq!(other.registry().get("terrain").map(|t| t.tile_size), Some(16));
        assert_eq!(other.config().export.name, "Untitled");
    }

    #[test]
    fn import_abandons_running_cave() {
        let mut source = EditorSession::new(config(10, 10)).unwrap();
        source.registry_mut().insert(TilesetRef::new("terrain", 4, 4, 16));
        source
            .editor_mut()
            .paint_single(LayerKind::Ground, 5, 5, Cell::new("terrain", 3));
        let doc = source.export().unwrap();

        let mut config = config(30, 30);
        config.cave.batch_size = 100;
        let mut session = EditorSession::new(config).unwrap();
        session.start_cave_seeded(LayerKind::Ground, cave_tiles(), 5);
        assert!(session.tick().is_some());

        session.import(&doc).unwrap();
        assert!(!session.is_generating());
        assert_eq!(session.tick(), None);
        session.finish_cave();

        let grid = session.editor().grid();
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.get(LayerKind::Ground, 5, 5), Some(&Cell::new("terrain", 3)));
        assert_eq!(grid.cell_count(LayerKind::Ground), 1);
    }

    #[test]
    fn failed_import_keeps_running_cave() {
        let mut session = EditorSession::new(config(20, 20)).unwrap();
        session.start_cave_seeded(LayerKind::Ground, cave_tiles(), 1);
        let mut doc = session.export().unwrap();
        doc.version = None;

        assert!(session.import(&doc).is_err());
        assert!(session.is_generating());
    }

    #[test]
    fn export_fails_for_unloaded_tileset() {
        let mut session = EditorSession::new(config(3, 3)).unwrap();
        session
            .editor_mut()
            .paint_single(LayerKind::Ground, 1, 1, Cell::new("ghost", 0));
        assert!(matches!(
            session.export(),
            Err(FormatError::MissingTilesetReference { .. })
        ));
    }
}
