//! Review repository for database operations.
//!
//! Restaurant reviews and item reviews are separate tables with separate ID
//! spaces, so each gets its own set of methods. Authorization (only the
//! author may edit or delete) is enforced a layer up, in
//! [`crate::gateways::ReviewsGateway`]; this repository is plain CRUD.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use nearbite_core::{ItemReviewId, MenuItemId, RestaurantId, RestaurantReviewId, UserId};

use super::RepositoryError;
use crate::models::review::{ItemReview, RestaurantReview};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for restaurant review queries.
#[derive(Debug, sqlx::FromRow)]
struct RestaurantReviewRow {
    id: i64,
    author_id: i64,
    restaurant_id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl From<RestaurantReviewRow> for RestaurantReview {
    fn from(row: RestaurantReviewRow) -> Self {
        Self {
            id: RestaurantReviewId::new(row.id),
            author_id: UserId::new(row.author_id),
            restaurant_id: RestaurantId::new(row.restaurant_id),
            title: row.title,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

/// Internal row type for item review queries.
#[derive(Debug, sqlx::FromRow)]
struct ItemReviewRow {
    id: i64,
    author_id: i64,
    item_id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl From<ItemReviewRow> for ItemReview {
    fn from(row: ItemReviewRow) -> Self {
        Self {
            id: ItemReviewId::new(row.id),
            author_id: UserId::new(row.author_id),
            item_id: MenuItemId::new(row.item_id),
            title: row.title,
            content: row.content,
            created_at: row.created_at,
        }
    }
}

const RESTAURANT_REVIEW_COLUMNS: &str =
    "id, author_id, restaurant_id, title, content, created_at";
const ITEM_REVIEW_COLUMNS: &str = "id, author_id, item_id, title, content, created_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for review database operations.
pub struct ReviewRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReviewRepository<'a> {
    /// Create a new review repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Restaurant Reviews
    // =========================================================================

    /// Insert a review of a restaurant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails (including
    /// foreign key failures for unknown authors or restaurants).
    pub async fn insert_restaurant_review(
        &self,
        author_id: UserId,
        restaurant_id: RestaurantId,
        title: &str,
        content: &str,
    ) -> Result<RestaurantReview, RepositoryError> {
        let row = sqlx::query_as::<_, RestaurantReviewRow>(&format!(
            "INSERT INTO restaurant_reviews (author_id, restaurant_id, title, content, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {RESTAURANT_REVIEW_COLUMNS}"
        ))
        .bind(author_id)
        .bind(restaurant_id)
        .bind(title)
        .bind(content)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Get a restaurant review by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_restaurant_review(
        &self,
        id: RestaurantReviewId,
    ) -> Result<Option<RestaurantReview>, RepositoryError> {
        let row = sqlx::query_as::<_, RestaurantReviewRow>(&format!(
            "SELECT {RESTAURANT_REVIEW_COLUMNS} FROM restaurant_reviews WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Replace the title and content of a restaurant review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the review doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_restaurant_review(
        &self,
        id: RestaurantReviewId,
        title: &str,
        content: &str,
    ) -> Result<RestaurantReview, RepositoryError> {
        let row = sqlx::query_as::<_, RestaurantReviewRow>(&format!(
            "UPDATE restaurant_reviews
             SET title = ?2, content = ?3
             WHERE id = ?1
             RETURNING {RESTAURANT_REVIEW_COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(content)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a restaurant review by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the review was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_restaurant_review(
        &self,
        id: RestaurantReviewId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM restaurant_reviews WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all reviews of a restaurant, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<RestaurantReview>, RepositoryError> {
        let rows = sqlx::query_as::<_, RestaurantReviewRow>(&format!(
            "SELECT {RESTAURANT_REVIEW_COLUMNS} FROM restaurant_reviews
             WHERE restaurant_id = ?1
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(restaurant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List all restaurant reviews written by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn restaurant_reviews_by_author(
        &self,
        author_id: UserId,
    ) -> Result<Vec<RestaurantReview>, RepositoryError> {
        let rows = sqlx::query_as::<_, RestaurantReviewRow>(&format!(
            "SELECT {RESTAURANT_REVIEW_COLUMNS} FROM restaurant_reviews
             WHERE author_id = ?1
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(author_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    // =========================================================================
    // Item Reviews
    // =========================================================================

    /// Insert a review of a menu item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails (including
    /// foreign key failures for unknown authors or items).
    pub async fn insert_item_review(
        &self,
        author_id: UserId,
        item_id: MenuItemId,
        title: &str,
        content: &str,
    ) -> Result<ItemReview, RepositoryError> {
        let row = sqlx::query_as::<_, ItemReviewRow>(&format!(
            "INSERT INTO item_reviews (author_id, item_id, title, content, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {ITEM_REVIEW_COLUMNS}"
        ))
        .bind(author_id)
        .bind(item_id)
        .bind(title)
        .bind(content)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Get an item review by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_item_review(
        &self,
        id: ItemReviewId,
    ) -> Result<Option<ItemReview>, RepositoryError> {
        let row = sqlx::query_as::<_, ItemReviewRow>(&format!(
            "SELECT {ITEM_REVIEW_COLUMNS} FROM item_reviews WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Replace the title and content of an item review.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the review doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_item_review(
        &self,
        id: ItemReviewId,
        title: &str,
        content: &str,
    ) -> Result<ItemReview, RepositoryError> {
        let row = sqlx::query_as::<_, ItemReviewRow>(&format!(
            "UPDATE item_reviews
             SET title = ?2, content = ?3
             WHERE id = ?1
             RETURNING {ITEM_REVIEW_COLUMNS}"
        ))
        .bind(id)
        .bind(title)
        .bind(content)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete an item review by ID.
    ///
    /// # Returns
    ///
    /// Returns `true` if the review was deleted, `false` if it didn't exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete_item_review(&self, id: ItemReviewId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM item_reviews WHERE id = ?1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List all reviews of a menu item, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_item(
        &self,
        item_id: MenuItemId,
    ) -> Result<Vec<ItemReview>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemReviewRow>(&format!(
            "SELECT {ITEM_REVIEW_COLUMNS} FROM item_reviews
             WHERE item_id = ?1
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(item_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List all item reviews written by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn item_reviews_by_author(
        &self,
        author_id: UserId,
    ) -> Result<Vec<ItemReview>, RepositoryError> {
        let rows = sqlx::query_as::<_, ItemReviewRow>(&format!(
            "SELECT {ITEM_REVIEW_COLUMNS} FROM item_reviews
             WHERE author_id = ?1
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(author_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
