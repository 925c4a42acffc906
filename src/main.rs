use clap::Parser;
use miette::Result;
use portalkit::cli::{Cli, Commands};
use portalkit::output::Printer;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Palette(args) => portalkit::cli::palette::run(args, &printer)?,
        Commands::Contrast(args) => portalkit::cli::contrast::run(args, &printer)?,
        Commands::Rules(args) => portalkit::cli::rules::run(args, &printer)?,
        Commands::Check(args) => portalkit::cli::check::run(args, &printer)?,
        Commands::Constraints(args) => portalkit::cli::constraints::run(args, &printer)?,
        Commands::Schema(args) => portalkit::cli::schema::run(args, &printer)?,
    }

    Ok(())
}
