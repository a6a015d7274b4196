//! Command-line front end
//!
//! ```text
//! tile_forge cave <out.json> [--width N] [--height N] [--seed N] [--config PATH]
//! tile_forge info <map.json>
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;
use tile_forge_cave::CaveTiles;
use tile_forge_core::{Cell, GridError, LayerKind, TilesetRef};
use tile_forge_format::{from_portable, load_map, FormatError};

use crate::config::{ConfigError, EditorConfig};
use crate::session::EditorSession;

/// Key of the tileset generated caves are painted with
pub const CAVE_TILESET_KEY: &str = "cave";

/// Errors surfaced by the command-line front end
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Generate and inspect tile maps
#[derive(Debug, Parser)]
#[command(name = "tile_forge", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Generate a cave on the ground layer and save it as a JSON map
    Cave {
        /// Output JSON path
        out: PathBuf,
        /// Grid width in tiles (overrides the config)
        #[arg(long)]
        width: Option<u32>,
        /// Grid height in tiles (overrides the config)
        #[arg(long)]
        height: Option<u32>,
        /// RNG seed; a random one is picked and reported when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Config file to use instead of the platform default
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print a summary of a JSON map
    Info {
        /// Map to read
        path: PathBuf,
    },
}

/// Execute a command and return the report to print
pub fn run(command: &Command) -> Result<String, CliError> {
    match command {
        Command::Cave {
            out,
            width,
            height,
            seed,
            config,
        } => {
            let mut config = match config {
                Some(path) => EditorConfig::load_from(path)?,
                None => EditorConfig::load(),
            };
            if let Some(width) = width {
                config.grid_width = *width;
            }
            if let Some(height) = height {
                config.grid_height = *height;
            }
            let tile_size = config.export.tile_size.unwrap_or(32);
            let seed = seed.unwrap_or_else(rand::random);

            let mut session = EditorSession::new(config)?;
            session.registry_mut().insert(
                TilesetRef::new(CAVE_TILESET_KEY, 2, 1, tile_size).with_display_name("Cave"),
            );
            let tiles = CaveTiles {
                wall: Cell::new(CAVE_TILESET_KEY, 1),
                floor: Some(Cell::new(CAVE_TILESET_KEY, 0)),
            };
            session.start_cave_seeded(LayerKind::Ground, tiles, seed);
            session.finish_cave();
            session.save(out)?;

            let grid = session.editor().grid();
            let walls = grid
                .iter_cells(LayerKind::Ground)
                .filter(|(_, _, cell)| cell.frame == 1)
                .count();
            Ok(format!(
                "wrote {}x{} cave (seed {}, {} walls) to {}",
                grid.width(),
                grid.height(),
                seed,
                walls,
                out.display()
            ))
        }
        Command::Info { path } => {
            let imported = from_portable(&load_map(path)?)?;
            let grid = &imported.grid;
            let mut report = format!(
                "{}: {}x{} tiles of {}px, {} tilesets",
                imported.name,
                grid.width(),
                grid.height(),
                imported.tile_size,
                imported.tilesets.len()
            );
            for kind in LayerKind::ALL {
                report.push_str(&format!("\n  {}: {} cells", kind, grid.cell_count(kind)));
            }
            Ok(report)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        Cli::try_parse_from(std::iter::once("tile_forge").chain(args.iter().copied())).map(|cli| cli.command)
    }

    #[test]
    fn parses_cave_command() {
        let command = parse(&["cave", "out.json", "--width", "40", "--seed", "7"]).unwrap();
        assert_eq!(
            command,
            Command::Cave {
                out: PathBuf::from("out.json"),
                width: Some(40),
                height: None,
                seed: Some(7),
                config: None,
            }
        );
        assert_eq!(
            parse(&["info", "map.json"]).unwrap(),
            Command::Info {
                path: PathBuf::from("map.json")
            }
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse(&[]).is_err());
        assert_eq!(parse(&["paint"]).unwrap_err().kind(), ErrorKind::InvalidSubcommand);
        assert_eq!(
            parse(&["cave"]).unwrap_err().kind(),
            ErrorKind::MissingRequiredArgument
        );
        assert_eq!(
            parse(&["cave", "o.json", "--width", "wide"]).unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert!(parse(&["cave", "o.json", "--seed"]).is_err());
        assert_eq!(
            parse(&["cave", "o.json", "--depth", "3"]).unwrap_err().kind(),
            ErrorKind::UnknownArgument
        );
        assert!(parse(&["info", "a", "b"]).is_err());
    }

    #[test]
    fn cave_then_info() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("cave.json");
        let config = dir.path().join("tile_forge.toml");

        let report = run(&Command::Cave {
            out: out.clone(),
            width: Some(24),
            height: Some(16),
            seed: Some(3),
            config: Some(config),
        })
        .unwrap();
        assert!(report.contains("24x16"), "{report}");

        let info = run(&Command::Info { path: out }).unwrap();
        assert!(info.contains("24x16 tiles of 32px, 1 tilesets"), "{info}");
        assert!(info.contains("ground: 384 cells"), "{info}");
        assert!(info.contains("decoration: 0 cells"), "{info}");
    }

    #[test]
    fn oversized_cave_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(&Command::Cave {
            out: dir.path().join("huge.json"),
            width: Some(100_000),
            height: Some(100_000),
            seed: Some(1),
            config: Some(dir.path().join("tile_forge.toml")),
        });
        assert!(matches!(result, Err(CliError::Grid(GridError::TooLarge { .. }))));
    }
}
