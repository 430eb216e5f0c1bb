//! Reconciliation of provider results into the local store.
//!
//! Provider ids are the identity key: a summary whose id is already cached
//! reuses the existing row untouched, and one that isn't becomes a new row.
//! Reconciliation never overwrites fields and never deletes - a restaurant
//! missing from today's search results is not evidence it closed. Fresher
//! data comes only from the explicit refresh operations.
//!
//! Concurrent callers can race each other between the lookup and the
//! insert. The UNIQUE index on the provider id settles it: the losing
//! insert surfaces as [`RepositoryError::Conflict`], which is resolved here
//! by re-reading the winner's row. Callers never see the conflict.

use std::collections::HashSet;

use sqlx::SqlitePool;
use tracing::{debug, instrument, warn};

use nearbite_core::ChainId;

use crate::db::{MenuItemRepository, RepositoryError, RestaurantRepository};
use crate::models::{MenuItem, Restaurant};
use crate::provider::{MenuItemSummary, RestaurantSummary};

/// Merges provider summaries into the local store.
pub struct Reconciler<'a> {
    pool: &'a SqlitePool,
}

impl<'a> Reconciler<'a> {
    /// Create a new reconciler.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Restaurants
    // =========================================================================

    /// Merge a batch of restaurant summaries, preserving input order.
    ///
    /// Repeats of a provider id within the batch collapse to the first
    /// occurrence; they produce neither an error nor a duplicate listing
    /// entry. Idempotent: running the same batch N times leaves exactly one
    /// row per distinct provider id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails. Insert conflicts are
    /// resolved internally and do not surface.
    #[instrument(skip_all, fields(batch = summaries.len()))]
    pub async fn reconcile_restaurants(
        &self,
        summaries: &[RestaurantSummary],
    ) -> Result<Vec<Restaurant>, RepositoryError> {
        let repo = RestaurantRepository::new(self.pool);
        let mut reconciled = Vec::with_capacity(summaries.len());
        let mut seen = HashSet::with_capacity(summaries.len());

        for summary in summaries {
            if !seen.insert(&summary.provider_id) {
                warn!(
                    provider_id = %summary.provider_id,
                    "provider repeated an id within one batch; keeping the first"
                );
                continue;
            }

            let restaurant = match repo.find_by_provider_id(&summary.provider_id).await? {
                Some(existing) => existing,
                None => self.insert_restaurant(&repo, summary).await?,
            };
            reconciled.push(restaurant);
        }

        Ok(reconciled)
    }

    /// Overwrite a cached restaurant's provider-sourced fields from a fresh
    /// summary, inserting it if it was never cached.
    ///
    /// The local id and `created_at` are untouched, so review and favorite
    /// references survive the refresh.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails.
    #[instrument(skip_all, fields(provider_id = %summary.provider_id))]
    pub async fn refresh_restaurant(
        &self,
        summary: &RestaurantSummary,
    ) -> Result<Restaurant, RepositoryError> {
        let repo = RestaurantRepository::new(self.pool);

        match repo.update_from_summary(summary).await {
            Ok(updated) => Ok(updated),
            Err(RepositoryError::NotFound) => match repo.insert(summary).await {
                Ok(inserted) => Ok(inserted),
                // A concurrent reconcile created the row after our update
                // missed; it exists now, so the overwrite goes through.
                Err(RepositoryError::Conflict(_)) => repo.update_from_summary(summary).await,
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        }
    }

    async fn insert_restaurant(
        &self,
        repo: &RestaurantRepository<'_>,
        summary: &RestaurantSummary,
    ) -> Result<Restaurant, RepositoryError> {
        match repo.insert(summary).await {
            Ok(restaurant) => Ok(restaurant),
            Err(RepositoryError::Conflict(_)) => {
                debug!(
                    provider_id = %summary.provider_id,
                    "lost an insert race to a concurrent reconcile; re-reading"
                );
                repo.find_by_provider_id(&summary.provider_id)
                    .await?
                    .ok_or_else(|| {
                        RepositoryError::DataCorruption(format!(
                            "restaurant {} vanished after insert conflict",
                            summary.provider_id
                        ))
                    })
            }
            Err(e) => Err(e),
        }
    }

    // =========================================================================
    // Menu Items
    // =========================================================================

    /// Merge a chain's menu-item summaries, preserving input order.
    ///
    /// Same discipline as restaurants, scoped to one chain. An item the
    /// provider attributes to a different chain, or whose id is already
    /// cached under a different chain, is an upstream inconsistency: that
    /// single item is skipped with a warning and the rest of the batch still
    /// reconciles.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails.
    #[instrument(skip_all, fields(chain = %chain, batch = summaries.len()))]
    pub async fn reconcile_menu_items(
        &self,
        chain: &ChainId,
        summaries: &[MenuItemSummary],
    ) -> Result<Vec<MenuItem>, RepositoryError> {
        let repo = MenuItemRepository::new(self.pool);
        let mut reconciled = Vec::with_capacity(summaries.len());
        let mut seen = HashSet::with_capacity(summaries.len());

        for summary in summaries {
            if summary.chain != *chain {
                warn!(
                    provider_id = summary.provider_id.as_i64(),
                    item_chain = %summary.chain,
                    "summary belongs to another chain; skipping"
                );
                continue;
            }
            if !seen.insert(summary.provider_id) {
                warn!(
                    provider_id = summary.provider_id.as_i64(),
                    "provider repeated an id within one batch; keeping the first"
                );
                continue;
            }

            match repo.find_by_provider_id(summary.provider_id).await? {
                Some(existing) if existing.chain == *chain => reconciled.push(existing),
                Some(existing) => {
                    warn!(
                        provider_id = summary.provider_id.as_i64(),
                        cached_chain = %existing.chain,
                        "provider id already cached under another chain; skipping"
                    );
                }
                None => {
                    if let Some(item) = self.insert_menu_item(&repo, chain, summary).await? {
                        reconciled.push(item);
                    }
                }
            }
        }

        Ok(reconciled)
    }

    /// Overwrite cached menu items from fresh summaries, inserting items
    /// that were never cached.
    ///
    /// Unlike reconciliation, a cached item under a different chain is
    /// reassigned here: the provider is authoritative during a refresh, and
    /// chains do occasionally rebrand.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails.
    #[instrument(skip_all, fields(chain = %chain, batch = summaries.len()))]
    pub async fn refresh_menu_items(
        &self,
        chain: &ChainId,
        summaries: &[MenuItemSummary],
    ) -> Result<Vec<MenuItem>, RepositoryError> {
        let repo = MenuItemRepository::new(self.pool);
        let mut refreshed = Vec::with_capacity(summaries.len());
        let mut seen = HashSet::with_capacity(summaries.len());

        for summary in summaries {
            if summary.chain != *chain {
                warn!(
                    provider_id = summary.provider_id.as_i64(),
                    item_chain = %summary.chain,
                    "summary belongs to another chain; skipping"
                );
                continue;
            }
            if !seen.insert(summary.provider_id) {
                warn!(
                    provider_id = summary.provider_id.as_i64(),
                    "provider repeated an id within one batch; keeping the first"
                );
                continue;
            }

            match repo.update_from_summary(summary).await {
                Ok(updated) => refreshed.push(updated),
                Err(RepositoryError::NotFound) => match repo.insert(summary).await {
                    Ok(inserted) => refreshed.push(inserted),
                    Err(RepositoryError::Conflict(_)) => {
                        refreshed.push(repo.update_from_summary(summary).await?);
                    }
                    Err(e) => return Err(e),
                },
                Err(e) => return Err(e),
            }
        }

        Ok(refreshed)
    }

    async fn insert_menu_item(
        &self,
        repo: &MenuItemRepository<'_>,
        chain: &ChainId,
        summary: &MenuItemSummary,
    ) -> Result<Option<MenuItem>, RepositoryError> {
        match repo.insert(summary).await {
            Ok(item) => Ok(Some(item)),
            Err(RepositoryError::Conflict(_)) => {
                debug!(
                    provider_id = summary.provider_id.as_i64(),
                    "lost an insert race to a concurrent reconcile; re-reading"
                );
                let existing = repo
                    .find_by_provider_id(summary.provider_id)
                    .await?
                    .ok_or_else(|| {
                        RepositoryError::DataCorruption(format!(
                            "menu item {} vanished after insert conflict",
                            summary.provider_id
                        ))
                    })?;

                if existing.chain == *chain {
                    Ok(Some(existing))
                } else {
                    warn!(
                        provider_id = summary.provider_id.as_i64(),
                        cached_chain = %existing.chain,
                        "provider id already cached under another chain; skipping"
                    );
                    Ok(None)
                }
            }
            Err(e) => Err(e),
        }
    }
}
