//! Discovery service orchestrating the provider, the reconciler, and the
//! local store.
//!
//! This is the surface the embedding application talks to: it never touches
//! the provider client or the repositories around this service. Geocoding
//! stays outside - callers resolve a zip to [`Coordinates`] first (via
//! [`crate::geocode::Geocoder`]) and pass the coordinates in.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, instrument};

use nearbite_core::{ChainId, Coordinates, ProviderRestaurantId};

use crate::db::{
    ChainMenuStateRepository, MenuItemRepository, RepositoryError, RestaurantRepository,
};
use crate::error::DiscoveryError;
use crate::models::{MenuFetchStatus, MenuItem, Restaurant};
use crate::provider::FoodDataProvider;
use crate::reconcile::Reconciler;

/// Orchestrates upstream lookups and local-store reconciliation.
pub struct DiscoveryService<'a, P> {
    pool: &'a SqlitePool,
    provider: &'a P,
}

impl<'a, P: FoodDataProvider> DiscoveryService<'a, P> {
    /// Create a new discovery service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, provider: &'a P) -> Self {
        Self { pool, provider }
    }

    /// Search for restaurants around a point and cache what comes back.
    ///
    /// Returns the reconciled rows in the provider's relevance order. An
    /// empty Vec means the provider genuinely found nothing nearby.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::Provider` if the upstream call fails (the
    /// local store is untouched in that case) and `DiscoveryError::Repository`
    /// if reconciliation fails.
    #[instrument(skip(self), fields(center = %center, radius_miles))]
    pub async fn nearby(
        &self,
        center: Coordinates,
        radius_miles: f64,
    ) -> Result<Vec<Restaurant>, DiscoveryError> {
        let summaries = self.provider.search_nearby(center, radius_miles).await?;
        let restaurants = Reconciler::new(self.pool)
            .reconcile_restaurants(&summaries)
            .await?;

        info!(count = restaurants.len(), "nearby search reconciled");
        Ok(restaurants)
    }

    /// Get one restaurant by its provider id, from the local store if
    /// cached, otherwise via a detail lookup that caches the result.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::Provider` with `ProviderError::NotFound`
    /// inside if the id is unknown both locally and upstream.
    #[instrument(skip(self), fields(provider_id = %provider_id))]
    pub async fn restaurant(
        &self,
        provider_id: &ProviderRestaurantId,
    ) -> Result<Restaurant, DiscoveryError> {
        let repo = RestaurantRepository::new(self.pool);

        if let Some(existing) = repo.find_by_provider_id(provider_id).await? {
            debug!("serving cached restaurant");
            return Ok(existing);
        }

        let summary = self.provider.restaurant_detail(provider_id).await?;
        let mut reconciled = Reconciler::new(self.pool)
            .reconcile_restaurants(std::slice::from_ref(&summary))
            .await?;

        reconciled.pop().ok_or_else(|| {
            RepositoryError::DataCorruption(format!(
                "restaurant {provider_id} not reconciled from its own detail lookup"
            ))
            .into()
        })
    }

    /// Get a chain's menu, fetching it from the provider on first view.
    ///
    /// The per-chain fetch-status row decides: once a chain is marked
    /// fetched, its catalog is served locally with no upstream call, even
    /// when that catalog is legitimately empty. A provider failure
    /// propagates before the chain is marked, so the next view retries.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::Provider` or `DiscoveryError::Repository`.
    #[instrument(skip(self), fields(chain = %chain))]
    pub async fn menu_for_chain(&self, chain: &ChainId) -> Result<Vec<MenuItem>, DiscoveryError> {
        let state_repo = ChainMenuStateRepository::new(self.pool);

        match state_repo.fetch_status(chain).await? {
            MenuFetchStatus::Fetched { at } => {
                debug!(fetched_at = %at, "serving cached menu");
                Ok(MenuItemRepository::new(self.pool).list_by_chain(chain).await?)
            }
            MenuFetchStatus::NotFetched => {
                let summaries = self.provider.menu_items(chain).await?;
                let items = Reconciler::new(self.pool)
                    .reconcile_menu_items(chain, &summaries)
                    .await?;
                state_repo.mark_fetched(chain, Utc::now()).await?;

                info!(count = items.len(), "menu hydrated");
                Ok(items)
            }
        }
    }

    /// Re-pull one restaurant from the provider and overwrite its cached
    /// fields. The only sanctioned way to get fresher restaurant data.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::Provider` or `DiscoveryError::Repository`.
    #[instrument(skip(self), fields(provider_id = %provider_id))]
    pub async fn refresh_restaurant(
        &self,
        provider_id: &ProviderRestaurantId,
    ) -> Result<Restaurant, DiscoveryError> {
        let summary = self.provider.restaurant_detail(provider_id).await?;
        let restaurant = Reconciler::new(self.pool).refresh_restaurant(&summary).await?;

        info!("restaurant refreshed");
        Ok(restaurant)
    }

    /// Re-pull a chain's catalog: update cached items, insert new ones,
    /// and move the fetch timestamp forward. Nothing is deleted.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::Provider` or `DiscoveryError::Repository`.
    #[instrument(skip(self), fields(chain = %chain))]
    pub async fn refresh_menu_for_chain(
        &self,
        chain: &ChainId,
    ) -> Result<Vec<MenuItem>, DiscoveryError> {
        let summaries = self.provider.menu_items(chain).await?;
        let items = Reconciler::new(self.pool)
            .refresh_menu_items(chain, &summaries)
            .await?;
        ChainMenuStateRepository::new(self.pool)
            .mark_fetched(chain, Utc::now())
            .await?;

        info!(count = items.len(), "menu refreshed");
        Ok(items)
    }
}
