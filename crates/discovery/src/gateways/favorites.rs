//! Favorites gateway: toggle semantics over the favorites tables.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use nearbite_core::UserId;

use crate::db::{FavoriteRepository, RepositoryError};
use crate::models::{FavoriteTarget, MenuItem, Restaurant, ToggleOutcome};

use super::{GatewayError, map_missing_target};

/// Gateway for marking and unmarking favorites.
pub struct FavoritesGateway<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FavoritesGateway<'a> {
    /// Create a new favorites gateway.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Flip a favorite: absent becomes present, present becomes absent.
    ///
    /// Inserts first. A primary-key conflict proves the pair already
    /// exists, so it is deleted instead. Either way exactly one state
    /// transition happens per invocation; two users (or two racing requests)
    /// can never double-add.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if the target row doesn't exist.
    /// Returns `GatewayError::Repository` if the store fails.
    #[instrument(skip(self), fields(user_id = %user_id, target = ?target))]
    pub async fn toggle(
        &self,
        user_id: UserId,
        target: FavoriteTarget,
    ) -> Result<ToggleOutcome, GatewayError> {
        let repo = FavoriteRepository::new(self.pool);

        match repo.insert(user_id, target).await {
            Ok(()) => {
                debug!("favorite added");
                Ok(ToggleOutcome::Added)
            }
            Err(RepositoryError::Conflict(_)) => {
                // Already a favorite; a concurrent toggle may win the delete,
                // which is fine - the end state is the same.
                repo.delete(user_id, target).await?;
                debug!("favorite removed");
                Ok(ToggleOutcome::Removed)
            }
            Err(e) => Err(map_missing_target(e)),
        }
    }

    /// Whether the user has this target marked as a favorite.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Repository` if the store fails.
    pub async fn is_favorite(
        &self,
        user_id: UserId,
        target: FavoriteTarget,
    ) -> Result<bool, GatewayError> {
        Ok(FavoriteRepository::new(self.pool)
            .exists(user_id, target)
            .await?)
    }

    /// The user's favorite restaurants, most recently favorited first.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Repository` if the store fails.
    pub async fn favorite_restaurants(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Restaurant>, GatewayError> {
        Ok(FavoriteRepository::new(self.pool)
            .restaurants_for_user(user_id)
            .await?)
    }

    /// The user's favorite menu items, most recently favorited first.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Repository` if the store fails.
    pub async fn favorite_menu_items(
        &self,
        user_id: UserId,
    ) -> Result<Vec<MenuItem>, GatewayError> {
        Ok(FavoriteRepository::new(self.pool)
            .items_for_user(user_id)
            .await?)
    }
}
