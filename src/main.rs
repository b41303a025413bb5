use anyhow::Result;
use clap::Parser;
use githours::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}
