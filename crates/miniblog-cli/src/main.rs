use clap::Parser;
use miniblog_store::{BlogStore, FileSlotStorage};
use tracing::Level;

mod cli;
mod commands;
mod config;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = config::CliConfig::resolve(cli.config.as_deref(), cli.data_dir.clone())?;
    let slot = FileSlotStorage::open(&config.data_dir)?;
    let store = BlogStore::with_config(slot, config.store)?;

    let mut stdout = std::io::stdout().lock();
    commands::run_command(&store, cli.command, cli.format, &mut stdout)
}
