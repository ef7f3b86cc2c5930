use std::path::PathBuf;

use clap::Args;
use goldsrc_bsp::{Bsp, ReadOptions};
use itertools::Itertools;
use miette::{Context, Result};
use owo_colors::OwoColorize;

#[derive(Args)]
pub struct InfoArgs {
    /// An input BSP file
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let options = ReadOptions::builder().validate(false).build();
        let bsp = Bsp::open_with_options(&self.file, options)
            .context(format!("reading {}", self.file.display()))?;

        println!("{}", self.file.display().bold());
        print!("{}", bsp.header());

        if let Some(textures) = bsp.textures() {
            let (embedded, external): (Vec<_>, Vec<_>) =
                textures.textures().iter().partition(|t| t.is_embedded());

            println!(
                "Textures: {} embedded, {} from WADs",
                embedded.len().green(),
                external.len().yellow()
            );
            println!(
                "  {}",
                textures
                    .textures()
                    .iter()
                    .map(|t| format!("{} ({}×{})", t.name(), t.width(), t.height()))
                    .join("\n  ")
            );
        }

        Ok(())
    }
}
