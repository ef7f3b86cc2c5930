use std::collections::HashSet;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use goldsrc_bsp::{Bsp, ReadOptions};
use goldsrc_wad::Wad;
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::commands::create_output;

#[derive(Args)]
pub struct MergeArgs {
    /// Input WAD files, earlier ones win on duplicate names
    #[arg(value_name = "WAD", required = true)]
    wads: Vec<PathBuf>,

    /// A target WAD file
    #[arg(short, long, value_name = "FILE")]
    out: PathBuf,

    /// Only keep textures used by a BSP in this directory
    #[arg(long, value_name = "DIR")]
    bsp_dir: Option<PathBuf>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

/// Lower-cased names of every texture used by the BSPs under `directory`
fn used_textures(directory: &Path) -> Result<HashSet<String>> {
    let levels = WalkDir::new(directory)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("bsp"))
        })
        .collect::<Vec<_>>();

    if levels.is_empty() {
        return Err(miette!("no BSP found in {}", directory.display()));
    }

    let options = ReadOptions::builder().validate(false).build();
    let mut used = HashSet::new();
    for level in levels {
        let bsp = Bsp::open_with_options(level.path(), options)
            .context(format!("reading {}", level.path().display()))?;

        let names = bsp.texture_names();
        debug!("{} uses {} textures", level.path().display(), names.len());
        used.extend(names.into_iter().map(|n| n.to_ascii_lowercase()));
    }

    Ok(used)
}

/// Add the textures of `wad` not yet in `merged`, under their directory names.
///
/// With `used`, only textures whose lower-cased directory name is in it are kept.
fn merge_into(merged: &mut Wad, wad: &Wad, source: &Path, used: Option<&HashSet<String>>) -> Result<usize> {
    let mut added = 0;
    for (entry, texture) in wad.entries() {
        let name = entry.name;
        if merged.entry(&name).is_some() {
            warn!("skipping duplicate texture {name} from {}", source.display());
            continue;
        }
        if used.is_some_and(|used| !used.contains(&name.to_string().to_ascii_lowercase())) {
            debug!("skipping unused texture {name}");
            continue;
        }

        merged
            .insert(name, texture.clone())
            .context(format!("adding {name}"))?;
        added += 1;
    }

    Ok(added)
}

impl MergeArgs {
    pub fn handle(&self) -> Result<()> {
        let used = self.bsp_dir.as_deref().map(used_textures).transpose()?;

        let mut merged = Wad::new();
        for path in &self.wads {
            info!("merging {}", path.display());
            let wad = Wad::open(path).context(format!("reading {}", path.display()))?;
            let added = merge_into(&mut merged, &wad, path, used.as_ref())?;
            debug!("{added} textures from {}", path.display());
        }

        if merged.is_empty() {
            return Err(miette!("no texture left to write"));
        }
        info!("writing {} textures to {}", merged.len(), self.out.display());

        let mut out = BufWriter::new(create_output(&self.out, self.overwrite)?);
        merged
            .write(&mut out)
            .context(format!("writing {}", self.out.display()))?;
        out.flush().into_diagnostic()?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;
    use std::path::Path;

    use goldsrc_types::{Palette, TextureName};
    use goldsrc_wad::{MipTexture, Wad};
    use pretty_assertions::assert_eq;

    use super::merge_into;

    fn wad(entries: &[(&str, &str)]) -> miette::Result<Wad> {
        let mut wad = Wad::new();
        for &(directory, header) in entries {
            let texture = MipTexture::new(header, 16, 16, Palette::default())?;
            wad.insert(TextureName::new(directory)?, texture)?;
        }
        Ok(wad)
    }

    #[test]
    fn keeps_directory_names() -> miette::Result<()> {
        let mut merged = Wad::new();
        merge_into(&mut merged, &wad(&[("BAR", "foo")])?, Path::new("a.wad"), None)?;

        assert_eq!(merged.names().collect::<Vec<_>>(), ["BAR"]);
        assert_eq!(merged.get("BAR").map(|t| t.name().to_string()), Some("foo".into()));

        Ok(())
    }

    #[test]
    fn earlier_archives_win() -> miette::Result<()> {
        let mut merged = Wad::new();
        merge_into(&mut merged, &wad(&[("SKY", "sky")])?, Path::new("a.wad"), None)?;
        let added = merge_into(
            &mut merged,
            &wad(&[("SKY", "other"), ("WALL", "wall")])?,
            Path::new("b.wad"),
            None,
        )?;

        assert_eq!(added, 1);
        assert_eq!(merged.names().collect::<Vec<_>>(), ["SKY", "WALL"]);
        assert_eq!(merged.get("SKY").map(|t| t.name().to_string()), Some("sky".into()));

        Ok(())
    }

    #[test]
    fn filters_on_directory_name() -> miette::Result<()> {
        let used = HashSet::from(["bar".to_string()]);
        let input = wad(&[("BAR", "foo"), ("FOO", "bar")])?;

        let mut merged = Wad::new();
        merge_into(&mut merged, &input, Path::new("a.wad"), Some(&used))?;

        assert_eq!(merged.names().collect::<Vec<_>>(), ["BAR"]);

        Ok(())
    }
}
