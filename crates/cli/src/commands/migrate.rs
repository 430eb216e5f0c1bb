//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! nb-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `NEARBITE_DATABASE_URL` - `SQLite` connection string
//! - `DATABASE_URL` - Fallback (what `sqlx-cli` and most hosts set)
//!
//! Migrations are embedded from `crates/discovery/migrations/` at compile
//! time, so the binary carries its own schema.

use tracing::info;

use nearbite_discovery::db;
use nearbite_discovery::error::DiscoveryError;

/// Apply pending database migrations.
///
/// # Errors
///
/// Returns an error if the database URL is missing, the database cannot be
/// opened, or a migration fails to apply.
pub async fn run() -> Result<(), DiscoveryError> {
    let pool = super::connect().await?;

    info!("Running migrations");
    db::MIGRATOR.run(&pool).await?;
    info!("Migrations complete");

    Ok(())
}
