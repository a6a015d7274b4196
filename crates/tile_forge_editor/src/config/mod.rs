//! Editor configuration
//!
//! Stored as TOML in the platform config directory:
//! - Windows: %APPDATA%/tile_forge/
//! - Linux: ~/.config/tile_forge/
//! - macOS: ~/Library/Application Support/tile_forge/

mod file;

pub use file::*;

use serde::{Deserialize, Serialize};
use tile_forge_cave::{CaveParams, DEFAULT_BATCH_SIZE, DEFAULT_ITERATIONS, DEFAULT_WALL_PROBABILITY};
use tile_forge_core::{FillHistory, DEFAULT_HISTORY_CAPACITY};
use tile_forge_format::ExportOptions;

/// Settings that shape an editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Version for future migrations
    pub version: u32,

    // Grid
    pub grid_width: u32,
    pub grid_height: u32,

    // History
    pub history_capacity: usize,
    pub fill_history: FillHistory,

    pub cave: CaveConfig,
    pub export: ExportConfig,
}

/// Cave generator and placement tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    pub wall_probability: f64,
    pub iterations: u32,
    /// Cells placed per frame
    pub batch_size: usize,
}

/// Document metadata for exports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub name: String,
    /// When unset, the first loaded tileset's tile size is used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<u32>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            version: 1,
            grid_width: 64,
            grid_height: 64,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            fill_history: FillHistory::default(),
            cave: CaveConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            wall_probability: DEFAULT_WALL_PROBABILITY,
            iterations: DEFAULT_ITERATIONS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            name: "Untitled".to_string(),
            tile_size: None,
        }
    }
}

impl CaveConfig {
    pub fn params(&self) -> CaveParams {
        CaveParams {
            wall_probability: self.wall_probability,
            iterations: self.iterations,
        }
    }
}

impl ExportConfig {
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            name: self.name.clone(),
            tile_size: self.tile_size,
        }
    }
}
