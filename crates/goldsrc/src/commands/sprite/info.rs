use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Args;
use goldsrc_spr::SpriteReader;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;

#[derive(Args)]
pub struct InfoArgs {
    /// An input sprite file
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let file = File::open(&self.file)
            .into_diagnostic()
            .context(format!("opening {}", self.file.display()))?;
        let mut reader = BufReader::new(file);

        let frames = SpriteReader::new(&mut reader)
            .context(format!("reading {}", self.file.display()))?;

        println!("{}", self.file.display().bold());
        print!("{}", frames.header());

        // Frames read before a failure are still printed
        for (i, frame) in frames.enumerate() {
            let frame = frame.context(format!("reading {}", self.file.display()))?;
            println!("Frame {i}:");
            print!("{frame}");
        }

        Ok(())
    }
}
