//! Database operations for the discovery `SQLite` store.
//!
//! # Tables
//!
//! - `users` - Accounts and their saved (zip, coordinates) location
//! - `restaurants` - Provider-sourced locations, unique per `provider_id`
//! - `menu_items` - Provider-sourced catalog entries, unique per `provider_id`
//! - `chain_menu_state` - Which chains have had their menu fetched
//! - `restaurant_reviews` / `item_reviews` - User reviews, two target kinds
//! - `restaurant_favorites` / `item_favorites` - Bare (user, target) memberships
//!
//! Queries use the runtime API with `FromRow` row types rather than the sqlx
//! macros, so building the crate never needs a live database.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/discovery/migrations/` and run via:
//! ```bash
//! cargo run -p nearbite-cli -- migrate
//! ```

pub mod favorites;
pub mod menu_items;
pub mod restaurants;
pub mod reviews;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use favorites::FavoriteRepository;
pub use menu_items::{ChainMenuStateRepository, MenuItemRepository};
pub use restaurants::RestaurantRepository;
pub use reviews::ReviewRepository;
pub use users::UserRepository;

/// Embedded schema migrations for the discovery store.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate provider id).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// WAL mode keeps readers unblocked while reconciliation writes; the busy
/// timeout absorbs short write contention instead of failing immediately.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is malformed or the connection cannot be
/// established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    async fn temp_pool(dir: &tempfile::TempDir) -> SqlitePool {
        let path = dir.path().join("discovery.db");
        let url = SecretString::from(format!("sqlite://{}", path.display()));
        create_pool(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_pool_and_migrate() {
        let dir = tempfile::tempdir().unwrap();
        let pool = temp_pool(&dir).await;

        MIGRATOR.run(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        for expected in [
            "chain_menu_state",
            "item_favorites",
            "item_reviews",
            "menu_items",
            "restaurant_favorites",
            "restaurant_reviews",
            "restaurants",
            "users",
        ] {
            assert!(
                tables.iter().any(|t| t == expected),
                "missing table {expected}, got {tables:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_migrations_are_rerunnable() {
        let dir = tempfile::tempdir().unwrap();
        let pool = temp_pool(&dir).await;

        MIGRATOR.run(&pool).await.unwrap();
        // A second run must be a no-op, not an error
        MIGRATOR.run(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let pool = temp_pool(&dir).await;
        MIGRATOR.run(&pool).await.unwrap();

        // No user 999 exists, so this insert must be rejected
        let result = sqlx::query(
            "INSERT INTO restaurant_reviews (author_id, restaurant_id, title, content, created_at)
             VALUES (999, 999, 't', 'c', '2026-01-01 00:00:00+00:00')",
        )
        .execute(&pool)
        .await;

        assert!(result.is_err());
    }
}
