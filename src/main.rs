mod cli;
mod config;
mod error;
mod release;
mod template;
mod version;
mod version_source;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use error::ReleaseError;

fn main() {
    if let Err(err) = run() {
        match err.downcast_ref::<ReleaseError>() {
            Some(ReleaseError::MissingArgument) => eprintln!("{err}"),
            _ => eprintln!("Error: {err:#}"),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logger(cli.debug)?;
    match cli.command {
        Commands::FromFile(args) => release::run_from_file(args),
        Commands::Create(args) => release::run_create(args),
    }
}

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("ghrel")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}
