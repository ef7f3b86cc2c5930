use std::path::PathBuf;

use clap::Args;
use goldsrc_wad::Wad;
use miette::{Context, Result};
use owo_colors::OwoColorize;

#[derive(Args)]
pub struct InfoArgs {
    /// An input WAD file
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let wad = Wad::open(&self.file).context(format!("reading {}", self.file.display()))?;

        println!("{}", self.file.display().bold());
        print!("{wad}");

        Ok(())
    }
}
