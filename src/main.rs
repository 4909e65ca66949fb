use clap::Parser;
use miette::Result;
use nextile::cli::{Cli, Commands};
use nextile::output::Printer;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new(cli.verbosity());

    match cli.command {
        Commands::Build(args) => nextile::cli::build::run(args, &printer)?,
        Commands::Tileset(args) => nextile::cli::tileset::run(args, &printer)?,
        Commands::Map(args) => nextile::cli::map::run(args, &printer)?,
        Commands::Preview(args) => nextile::cli::preview::run(args, &printer)?,
        Commands::Watch(args) => nextile::cli::watch::run(args, &printer)?,
        Commands::Completions(args) => nextile::cli::completions::run(args)?,
    }

    Ok(())
}
