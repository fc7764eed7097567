//! appsync CLI
//!
//! Command-line entry point for syncing a local project with its remote
//! application object store.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e.user_message());
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let project_root = std::env::current_dir()?;
    match cli.command {
        Commands::Init => commands::run_init(&project_root),
        Commands::Upload => commands::run_upload(&project_root).await,
        Commands::Download => commands::run_download(&project_root).await,
    }
}
