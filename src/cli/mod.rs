use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::AppConfig;

pub mod event;
pub mod group;
pub mod scan;

#[derive(Subcommand)]
enum Command {
    /// Archive a single event into downloads/
    Event {
        /// Meetup event id
        id: String,
    },
    /// Archive every past event of a group into <id>/
    Group {
        /// Meetup group id or urlname
        id: String,
    },
    /// Rebuild index.html and attendees/ from downloads/
    Scan {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true, arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_CRATE_NAME"), level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();
    let config = AppConfig::default();
    init_tracing(config.verbose);

    match args.command {
        Command::Event { id } => event::run(&config, &id).await?,
        Command::Group { id } => group::run(&config, &id).await?,
        Command::Scan {} => scan::run(&config)?,
    }

    Ok(())
}
