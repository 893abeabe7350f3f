//! TAO runtime core - Entry Point

// Force-link tao-providers to ensure linkme registrations are included
extern crate tao_providers;

use clap::Parser;
use tao::cli::{Cli, execute};
use tao_infrastructure::logging::init_logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_logging(config.logging.clone())?;
    let output = execute(&cli.command, config)?;
    print!("{output}");
    Ok(())
}
