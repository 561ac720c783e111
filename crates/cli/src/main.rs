//! Patty Wagon CLI - database migrations and menu seeding.
//!
//! # Usage
//!
//! ```bash
//! # Apply all pending migrations
//! pw-cli migrate
//!
//! # Load the menu from a YAML file
//! pw-cli seed crates/cli/seed/menu.yaml
//!
//! # Replace the whole catalog with the file's contents
//! pw-cli seed crates/cli/seed/menu.yaml --clear
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Load categories and products from YAML

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "pw-cli")]
#[command(author, version, about = "Patty Wagon CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the catalog from a YAML file
    Seed {
        /// Path to the YAML menu file
        file: PathBuf,

        /// Delete every existing product and category first
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { file, clear } => commands::seed::menu(&file, clear).await?,
    }
    Ok(())
}
