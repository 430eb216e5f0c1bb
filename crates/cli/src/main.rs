//! Nearbite CLI - Database migrations, seeding, and nearby lookups.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! nb-cli migrate
//!
//! # Reset the database and insert sample data
//! nb-cli seed
//!
//! # Geocode a zip code and list nearby restaurants
//! nb-cli nearby 92101
//!
//! # Same, with an explicit radius in miles
//! nb-cli nearby 92101 --radius 10
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Reset the database and insert sample data
//! - `nearby` - End-to-end lookup against the real upstream APIs

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use nearbite_discovery::error::DiscoveryError;

mod commands;

#[derive(Parser)]
#[command(name = "nb-cli")]
#[command(author, version, about = "Nearbite CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Reset the database and insert sample data
    Seed,
    /// Geocode a zip code and list nearby restaurants
    Nearby {
        /// Postal code to search around
        zip: String,

        /// Search radius in miles (defaults to `NEARBITE_SEARCH_RADIUS_MILES`)
        #[arg(short, long)]
        radius: Option<f64>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), DiscoveryError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Nearby { zip, radius } => commands::nearby::run(&zip, radius).await?,
    }
    Ok(())
}
