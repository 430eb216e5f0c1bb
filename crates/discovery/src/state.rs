//! Application state shared across the embedding application.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::DiscoveryConfig;
use crate::db::{self, RepositoryError, UserRepository};
use crate::error::DiscoveryError;
use crate::gateways::{FavoritesGateway, ReviewsGateway};
use crate::geocode::PositionStackClient;
use crate::provider::SpoonacularClient;
use crate::services::DiscoveryService;

/// Application state shared across all callers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to shared
/// resources: the connection pool, the configured upstream clients, and the
/// services and gateways built over them.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: DiscoveryConfig,
    pool: SqlitePool,
    geocoder: PositionStackClient,
    provider: SpoonacularClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Opens the `SQLite` pool and constructs the geocoder and provider
    /// clients from `config`. Migrations are not applied here; call
    /// [`AppState::run_migrations`] (or the `migrate` CLI command) first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database pool cannot be opened.
    pub async fn new(config: DiscoveryConfig) -> Result<Self, DiscoveryError> {
        let pool = db::create_pool(&config.database_url)
            .await
            .map_err(RepositoryError::from)?;
        let geocoder = PositionStackClient::new(&config.geocoder);
        let provider = SpoonacularClient::new(&config.provider);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                geocoder,
                provider,
            }),
        })
    }

    /// Apply any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails to apply.
    pub async fn run_migrations(&self) -> Result<(), DiscoveryError> {
        db::MIGRATOR.run(self.pool()).await?;
        Ok(())
    }

    /// Get a reference to the discovery configuration.
    #[must_use]
    pub fn config(&self) -> &DiscoveryConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the Positionstack geocoding client.
    #[must_use]
    pub fn geocoder(&self) -> &PositionStackClient {
        &self.inner.geocoder
    }

    /// Build a [`DiscoveryService`] over the shared pool and provider client.
    #[must_use]
    pub fn discovery(&self) -> DiscoveryService<'_, SpoonacularClient> {
        DiscoveryService::new(self.pool(), &self.inner.provider)
    }

    /// Build a [`FavoritesGateway`] over the shared pool.
    #[must_use]
    pub fn favorites(&self) -> FavoritesGateway<'_> {
        FavoritesGateway::new(self.pool())
    }

    /// Build a [`ReviewsGateway`] over the shared pool.
    #[must_use]
    pub fn reviews(&self) -> ReviewsGateway<'_> {
        ReviewsGateway::new(self.pool())
    }

    /// Build a [`UserRepository`] over the shared pool.
    #[must_use]
    pub fn users(&self) -> UserRepository<'_> {
        UserRepository::new(self.pool())
    }
}
