pub mod info;
pub mod merge;

#[derive(clap::Subcommand)]
pub enum WadCommands {
    /// Print the directory and textures of a WAD
    Info(info::InfoArgs),
    /// Merge the textures of several WADs into one
    Merge(merge::MergeArgs),
}

impl WadCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            WadCommands::Info(info) => info.handle(),
            WadCommands::Merge(merge) => merge.handle(),
        }
    }
}
