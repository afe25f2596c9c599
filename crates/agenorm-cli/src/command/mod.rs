use clap::{Parser, Subcommand};

use self::{catalogue::ExportCatalogueArg, generate::GenerateArg};

mod catalogue;
mod generate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What to run; generates the report when omitted
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Compute normative statistics and write the dashboard data file
    Generate(#[clap(flatten)] GenerateArg),
    /// Write the built-in metric catalogue as JSON
    ExportCatalogue(#[clap(flatten)] ExportCatalogueArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Generate(GenerateArg::default())) {
        Mode::Generate(arg) => generate::run(&arg)?,
        Mode::ExportCatalogue(arg) => catalogue::run(&arg)?,
    }
    Ok(())
}
