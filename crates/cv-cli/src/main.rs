//! confver CLI - track and apply versioned configuration migrations

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{install, list, run, uninstall};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.global.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    match &cli.command {
        cli::Commands::Install => install::execute(&cli.global).await,
        cli::Commands::Uninstall => uninstall::execute(&cli.global).await,
        cli::Commands::List(args) => list::execute(args, &cli.global).await,
        cli::Commands::Run(args) => run::execute(args, &cli.global).await,
        cli::Commands::RunAll => run::execute_all(&cli.global).await,
    }
}
