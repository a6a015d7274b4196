//! tile_forge_editor - Session glue and command-line front end for tile_forge
//!
//! This crate ties the engine crates together:
//! - `EditorConfig` - TOML settings (grid size, history, cave tuning, export metadata)
//! - `EditorSession` - The editor, loaded tilesets and batched cave placement
//! - `cli` - The `tile_forge` binary's argument parsing and commands
//!
//! # Usage
//!
//! ```rust,ignore
//! use tile_forge_editor::{EditorConfig, EditorSession};
//!
//! let mut session = EditorSession::new(EditorConfig::load())?;
//! session.start_cave_seeded(LayerKind::Ground, tiles, 42);
//! // once per frame:
//! session.tick();
//! ```

pub mod cli;
pub mod config;
pub mod session;

// Re-export the engine crates
pub use tile_forge_cave;
pub use tile_forge_core;
pub use tile_forge_format;

pub use config::{CaveConfig, ConfigError, EditorConfig, ExportConfig};
pub use session::EditorSession;
