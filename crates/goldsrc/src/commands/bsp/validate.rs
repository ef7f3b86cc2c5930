use std::path::PathBuf;

use clap::Args;
use goldsrc_bsp::{Bsp, ReadOptions};
use miette::{Context, Result};
use owo_colors::OwoColorize;
use tracing::info;

#[derive(Args)]
pub struct ValidateArgs {
    /// An input BSP file
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

impl ValidateArgs {
    pub fn handle(&self) -> Result<()> {
        info!("validating {}", self.file.display());

        let options = ReadOptions::builder().validate(false).build();
        let bsp = Bsp::open_with_options(&self.file, options)
            .context(format!("reading {}", self.file.display()))?;

        bsp.validate()
            .context(format!("validating {}", self.file.display()))?;

        println!("{} no problems found", "✅".green());
        Ok(())
    }
}
