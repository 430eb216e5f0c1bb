//! CLI command implementations.

pub mod migrate;
pub mod nearby;
pub mod seed;

use secrecy::SecretString;
use sqlx::SqlitePool;

use nearbite_discovery::config::ConfigError;
use nearbite_discovery::db;
use nearbite_discovery::error::DiscoveryError;

/// Open a pool against the configured database.
///
/// Reads `NEARBITE_DATABASE_URL` (falling back to `DATABASE_URL`) directly so
/// database-only commands work without the upstream API keys configured.
async fn connect() -> Result<SqlitePool, DiscoveryError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("NEARBITE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| ConfigError::MissingEnvVar("NEARBITE_DATABASE_URL".to_string()))?;

    let pool = db::create_pool(&database_url)
        .await
        .map_err(db::RepositoryError::from)?;

    Ok(pool)
}
