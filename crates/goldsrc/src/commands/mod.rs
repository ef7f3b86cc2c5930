use std::fs::File;
use std::path::Path;

use miette::{Context, IntoDiagnostic, Result};

pub mod bsp;
pub mod sprite;
pub mod wad;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle BSP levels
    Bsp {
        #[command(subcommand)]
        command: bsp::BspCommands,
    },
    /// Handle WAD texture archives
    Wad {
        #[command(subcommand)]
        command: wad::WadCommands,
    },
    /// Handle sprites
    Sprite {
        #[command(subcommand)]
        command: sprite::SpriteCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> Result<()> {
        match self {
            Commands::Bsp { command } => command.handle(),
            Commands::Wad { command } => command.handle(),
            Commands::Sprite { command } => command.handle(),
        }
    }
}

/// Create an output file, refusing to replace an existing one unless asked to
pub fn create_output(path: &Path, overwrite: bool) -> Result<File> {
    let file = if overwrite {
        File::create(path)
    } else {
        File::create_new(path)
    };

    file.into_diagnostic()
        .context(format!("creating {}", path.display()))
}
