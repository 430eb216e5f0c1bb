//! Favorite repository for database operations.
//!
//! Favorites are plain (user, target) pairs with no ID of their own; the
//! composite primary key doubles as the uniqueness guarantee. Toggle
//! semantics (add if absent, remove if present) live in
//! [`crate::gateways::FavoritesGateway`] on top of the primitives here.

use chrono::Utc;
use sqlx::SqlitePool;

use nearbite_core::UserId;

use super::RepositoryError;
use super::menu_items::MenuItemRow;
use super::restaurants::RestaurantRow;
use crate::models::favorite::FavoriteTarget;
use crate::models::{MenuItem, Restaurant};

// Qualified column lists: `created_at` exists on both sides of the joins
// below, so the plain lists from the sibling modules would be ambiguous.
const JOINED_RESTAURANT_COLUMNS: &str =
    "r.id, r.provider_id, r.chain, r.name, r.address, r.cuisines, r.description, \
     r.phone, r.photo_url, r.latitude, r.longitude, r.sunday_hours, r.monday_hours, \
     r.tuesday_hours, r.wednesday_hours, r.thursday_hours, r.friday_hours, \
     r.saturday_hours, r.created_at";
const JOINED_MENU_ITEM_COLUMNS: &str =
    "m.id, m.provider_id, m.chain, m.title, m.image_url, m.created_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for favorite database operations.
pub struct FavoriteRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> FavoriteRepository<'a> {
    /// Create a new favorite repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record that a user favorited a target.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the pair is already recorded.
    /// Returns `RepositoryError::Database` for other database errors
    /// (including foreign key failures for unknown users or targets).
    pub async fn insert(
        &self,
        user_id: UserId,
        target: FavoriteTarget,
    ) -> Result<(), RepositoryError> {
        let result = match target {
            FavoriteTarget::Restaurant(id) => {
                sqlx::query(
                    "INSERT INTO restaurant_favorites (user_id, restaurant_id, created_at)
                     VALUES (?1, ?2, ?3)",
                )
                .bind(user_id)
                .bind(id)
                .bind(Utc::now())
                .execute(self.pool)
                .await
            }
            FavoriteTarget::MenuItem(id) => {
                sqlx::query(
                    "INSERT INTO item_favorites (user_id, item_id, created_at)
                     VALUES (?1, ?2, ?3)",
                )
                .bind(user_id)
                .bind(id)
                .bind(Utc::now())
                .execute(self.pool)
                .await
            }
        };

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return Err(RepositoryError::Conflict("already a favorite".to_owned()));
                }
                Err(RepositoryError::Database(e))
            }
        }
    }

    /// Remove a favorite.
    ///
    /// # Returns
    ///
    /// Returns `true` if a favorite was removed, `false` if the pair
    /// wasn't recorded.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(
        &self,
        user_id: UserId,
        target: FavoriteTarget,
    ) -> Result<bool, RepositoryError> {
        let result = match target {
            FavoriteTarget::Restaurant(id) => {
                sqlx::query(
                    "DELETE FROM restaurant_favorites WHERE user_id = ?1 AND restaurant_id = ?2",
                )
                .bind(user_id)
                .bind(id)
                .execute(self.pool)
                .await?
            }
            FavoriteTarget::MenuItem(id) => {
                sqlx::query("DELETE FROM item_favorites WHERE user_id = ?1 AND item_id = ?2")
                    .bind(user_id)
                    .bind(id)
                    .execute(self.pool)
                    .await?
            }
        };

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a user has favorited a target.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn exists(
        &self,
        user_id: UserId,
        target: FavoriteTarget,
    ) -> Result<bool, RepositoryError> {
        let count: i64 = match target {
            FavoriteTarget::Restaurant(id) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM restaurant_favorites
                     WHERE user_id = ?1 AND restaurant_id = ?2",
                )
                .bind(user_id)
                .bind(id)
                .fetch_one(self.pool)
                .await?
            }
            FavoriteTarget::MenuItem(id) => {
                sqlx::query_scalar(
                    "SELECT COUNT(*) FROM item_favorites WHERE user_id = ?1 AND item_id = ?2",
                )
                .bind(user_id)
                .bind(id)
                .fetch_one(self.pool)
                .await?
            }
        };

        Ok(count > 0)
    }

    /// List the restaurants a user has favorited, most recently favorited
    /// first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if a stored restaurant
    /// fails validation. Returns `RepositoryError::Database` if the query
    /// fails.
    pub async fn restaurants_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Restaurant>, RepositoryError> {
        let rows = sqlx::query_as::<_, RestaurantRow>(&format!(
            "SELECT {JOINED_RESTAURANT_COLUMNS} FROM restaurants r
             JOIN restaurant_favorites f ON f.restaurant_id = r.id
             WHERE f.user_id = ?1
             ORDER BY f.created_at DESC, r.id DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// List the menu items a user has favorited, most recently favorited
    /// first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items_for_user(&self, user_id: UserId) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {JOINED_MENU_ITEM_COLUMNS} FROM menu_items m
             JOIN item_favorites f ON f.item_id = m.id
             WHERE f.user_id = ?1
             ORDER BY f.created_at DESC, m.id DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
