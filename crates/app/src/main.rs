use clap::Parser;
use practice_core::Clock;

mod commands;
mod config;
mod logging;
mod output;

use config::{AppConfig, Cli, prepare_sqlite_file};

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli);
    logging::init(&config.log_filter);

    // migrations run when the services open the store
    prepare_sqlite_file(&config.db_url)?;
    tracing::debug!(db = %config.db_url, command = ?cli.command, "running");

    let text = commands::execute(&config, Clock::default_clock(), cli.command).await?;
    print!("{text}");
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
