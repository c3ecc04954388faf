//! Command implementations

mod classify;
mod inspect;
mod locate;
mod regions;
mod summarize;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::Printer;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let mut printer = Printer::new(cli.json);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Regions => regions::execute(&config, &mut printer),
        Commands::Locate(args) => locate::execute(args, &config, &mut printer),
        Commands::Classify(args) => classify::execute(args, &config, &mut printer).await,
        Commands::Summarize(args) => summarize::execute(args, &config, &mut printer).await,
        Commands::Config => inspect::execute(&config, &mut printer),
    }
}
