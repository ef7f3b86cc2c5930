pub mod info;
pub mod rename;
pub mod validate;

#[derive(clap::Subcommand)]
pub enum BspCommands {
    /// Print the lump table and textures of a BSP
    Info(info::InfoArgs),
    /// Report every problem found in a BSP
    Validate(validate::ValidateArgs),
    /// Rename embedded textures and rewrite the BSP
    Rename(rename::RenameArgs),
}

impl BspCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            BspCommands::Info(info) => info.handle(),
            BspCommands::Validate(validate) => validate.handle(),
            BspCommands::Rename(rename) => rename.handle(),
        }
    }
}
