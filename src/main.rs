use clap::Parser;
use glyphsheet::cli::{Cli, Commands};
use glyphsheet::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = if cli.quiet { Printer::quiet() } else { Printer::new() };

    match cli.command {
        Commands::Build(args) => glyphsheet::cli::build::run(args, &printer)?,
        Commands::Init(args) => glyphsheet::cli::init::run(args, &printer)?,
        Commands::List(args) => glyphsheet::cli::list::run(args, &printer)?,
        Commands::Validate(args) => glyphsheet::cli::validate::run(args, &printer)?,
        Commands::Completions(args) => glyphsheet::cli::completions::run(args)?,
    }

    Ok(())
}
