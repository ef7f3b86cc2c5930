pub mod info;

#[derive(clap::Subcommand)]
pub enum SpriteCommands {
    /// Print the header and frames of a sprite
    Info(info::InfoArgs),
}

impl SpriteCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            SpriteCommands::Info(info) => info.handle(),
        }
    }
}
