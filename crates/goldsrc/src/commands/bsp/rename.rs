use std::collections::HashMap;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use goldsrc_bsp::Bsp;
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing::info;

use crate::commands::create_output;

fn parse_rename(s: &str) -> std::result::Result<(String, String), String> {
    let (old, new) = s
        .split_once('=')
        .ok_or(format!("expected OLD=NEW, got {s}"))?;
    if old.is_empty() || new.is_empty() {
        return Err(format!("expected OLD=NEW, got {s}"));
    }

    Ok((old.to_string(), new.to_string()))
}

#[derive(Args)]
pub struct RenameArgs {
    /// An input BSP file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// A target BSP file
    #[arg(short, long, value_name = "FILE")]
    out: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Texture renames
    #[arg(value_name = "OLD=NEW", value_parser = parse_rename, required = true)]
    renames: Vec<(String, String)>,
}

impl RenameArgs {
    pub fn handle(&self) -> Result<()> {
        let mut bsp =
            Bsp::open(&self.file).context(format!("reading {}", self.file.display()))?;

        let renames: HashMap<String, String> = self.renames.iter().cloned().collect();
        let renamed = bsp.apply_renames(&renames).context("renaming textures")?;
        if renamed == 0 {
            return Err(miette!("no embedded texture matches the given names"));
        }
        info!("renamed {renamed} textures");

        let mut out = BufWriter::new(create_output(&self.out, self.overwrite)?);
        bsp.write(&mut out)
            .context(format!("writing {}", self.out.display()))?;
        out.flush().into_diagnostic()?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::parse_rename;

    #[test]
    fn rename_pairs() {
        assert_eq!(
            parse_rename("crate01=box"),
            Ok(("crate01".to_string(), "box".to_string()))
        );
        assert!(parse_rename("crate01").is_err());
        assert!(parse_rename("=box").is_err());
    }
}
