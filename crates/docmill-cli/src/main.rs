//! Docmill CLI - turn e-commerce policy documents into knowledge entries.

use clap::Parser;
use docmill_cli::commands;
use docmill_cli::{Cli, Command, Config, Formatter};
use docmill_store::SqliteStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|_| {
        let cfg = Config::default();
        cfg.save().ok();
        cfg
    });

    if let Some(database) = cli.database {
        config.database = Some(database.into());
    }

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Process(args) => {
            commands::execute_process(args, &config, &formatter).await?;
        }
        Command::Entries(args) => {
            let store = SqliteStore::new(config.database_path()?)?;
            commands::execute_entries(args, &store, &formatter)?;
        }
        Command::Approve(args) => {
            let mut store = SqliteStore::new(config.database_path()?)?;
            commands::execute_approve(args, &mut store, &formatter)?;
        }
        Command::Delete(args) => {
            let mut store = SqliteStore::new(config.database_path()?)?;
            commands::execute_delete(args, &mut store, &formatter)?;
        }
    }

    Ok(())
}
