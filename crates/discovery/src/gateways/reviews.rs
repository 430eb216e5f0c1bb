//! Reviews gateway: author-owned CRUD over the two review tables.
//!
//! The ownership rule is the whole point of this layer: update and delete
//! first load the row, compare its `author_id` against the caller, and
//! refuse with [`GatewayError::Forbidden`] on mismatch. The repositories
//! underneath would happily mutate anyone's review.

use sqlx::SqlitePool;
use tracing::{debug, instrument};

use nearbite_core::{ItemReviewId, MenuItemId, RestaurantId, RestaurantReviewId, UserId};

use crate::db::ReviewRepository;
use crate::models::{ItemReview, RestaurantReview};

use super::{GatewayError, map_missing_target};

/// A user's authored reviews of both kinds, for a profile listing.
#[derive(Debug)]
pub struct AuthorReviews {
    /// Reviews of restaurant locations, newest first.
    pub restaurant_reviews: Vec<RestaurantReview>,
    /// Reviews of menu items, newest first.
    pub item_reviews: Vec<ItemReview>,
}

/// Gateway for creating, editing, and listing reviews.
pub struct ReviewsGateway<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ReviewsGateway<'a> {
    /// Create a new reviews gateway.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Restaurant Reviews
    // =========================================================================

    /// Create a review of a restaurant. A user may review the same
    /// restaurant any number of times.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if the restaurant (or author)
    /// doesn't exist. Returns `GatewayError::Repository` if the store fails.
    #[instrument(skip(self, title, content), fields(author_id = %author_id, restaurant_id = %restaurant_id))]
    pub async fn create_restaurant_review(
        &self,
        author_id: UserId,
        restaurant_id: RestaurantId,
        title: &str,
        content: &str,
    ) -> Result<RestaurantReview, GatewayError> {
        let review = ReviewRepository::new(self.pool)
            .insert_restaurant_review(author_id, restaurant_id, title, content)
            .await
            .map_err(map_missing_target)?;

        debug!(review_id = %review.id, "restaurant review created");
        Ok(review)
    }

    /// Replace the title and content of a restaurant review.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if the review doesn't exist and
    /// `GatewayError::Forbidden` if the caller didn't write it.
    #[instrument(skip(self, title, content), fields(caller = %caller, review_id = %id))]
    pub async fn update_restaurant_review(
        &self,
        caller: UserId,
        id: RestaurantReviewId,
        title: &str,
        content: &str,
    ) -> Result<RestaurantReview, GatewayError> {
        let repo = ReviewRepository::new(self.pool);
        let review = repo
            .get_restaurant_review(id)
            .await?
            .ok_or(GatewayError::NotFound)?;

        if review.author_id != caller {
            return Err(GatewayError::Forbidden);
        }

        Ok(repo.update_restaurant_review(id, title, content).await?)
    }

    /// Delete a restaurant review.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if the review doesn't exist and
    /// `GatewayError::Forbidden` if the caller didn't write it - in which
    /// case the row is left intact.
    #[instrument(skip(self), fields(caller = %caller, review_id = %id))]
    pub async fn delete_restaurant_review(
        &self,
        caller: UserId,
        id: RestaurantReviewId,
    ) -> Result<(), GatewayError> {
        let repo = ReviewRepository::new(self.pool);
        let review = repo
            .get_restaurant_review(id)
            .await?
            .ok_or(GatewayError::NotFound)?;

        if review.author_id != caller {
            return Err(GatewayError::Forbidden);
        }

        repo.delete_restaurant_review(id).await?;
        debug!("restaurant review deleted");
        Ok(())
    }

    /// All reviews of a restaurant, newest first.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Repository` if the store fails.
    pub async fn restaurant_reviews(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<RestaurantReview>, GatewayError> {
        Ok(ReviewRepository::new(self.pool)
            .list_for_restaurant(restaurant_id)
            .await?)
    }

    // =========================================================================
    // Menu Item Reviews
    // =========================================================================

    /// Create a review of a menu item.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if the item (or author) doesn't
    /// exist. Returns `GatewayError::Repository` if the store fails.
    #[instrument(skip(self, title, content), fields(author_id = %author_id, item_id = %item_id))]
    pub async fn create_menu_item_review(
        &self,
        author_id: UserId,
        item_id: MenuItemId,
        title: &str,
        content: &str,
    ) -> Result<ItemReview, GatewayError> {
        let review = ReviewRepository::new(self.pool)
            .insert_item_review(author_id, item_id, title, content)
            .await
            .map_err(map_missing_target)?;

        debug!(review_id = %review.id, "menu item review created");
        Ok(review)
    }

    /// Replace the title and content of a menu item review.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if the review doesn't exist and
    /// `GatewayError::Forbidden` if the caller didn't write it.
    #[instrument(skip(self, title, content), fields(caller = %caller, review_id = %id))]
    pub async fn update_menu_item_review(
        &self,
        caller: UserId,
        id: ItemReviewId,
        title: &str,
        content: &str,
    ) -> Result<ItemReview, GatewayError> {
        let repo = ReviewRepository::new(self.pool);
        let review = repo.get_item_review(id).await?.ok_or(GatewayError::NotFound)?;

        if review.author_id != caller {
            return Err(GatewayError::Forbidden);
        }

        Ok(repo.update_item_review(id, title, content).await?)
    }

    /// Delete a menu item review.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotFound` if the review doesn't exist and
    /// `GatewayError::Forbidden` if the caller didn't write it - in which
    /// case the row is left intact.
    #[instrument(skip(self), fields(caller = %caller, review_id = %id))]
    pub async fn delete_menu_item_review(
        &self,
        caller: UserId,
        id: ItemReviewId,
    ) -> Result<(), GatewayError> {
        let repo = ReviewRepository::new(self.pool);
        let review = repo.get_item_review(id).await?.ok_or(GatewayError::NotFound)?;

        if review.author_id != caller {
            return Err(GatewayError::Forbidden);
        }

        repo.delete_item_review(id).await?;
        debug!("menu item review deleted");
        Ok(())
    }

    /// All reviews of a menu item, newest first.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Repository` if the store fails.
    pub async fn menu_item_reviews(
        &self,
        item_id: MenuItemId,
    ) -> Result<Vec<ItemReview>, GatewayError> {
        Ok(ReviewRepository::new(self.pool).list_for_item(item_id).await?)
    }

    // =========================================================================
    // Profile Listings
    // =========================================================================

    /// Everything the user has written, newest first within each kind.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Repository` if the store fails.
    pub async fn reviews_by_author(&self, author_id: UserId) -> Result<AuthorReviews, GatewayError> {
        let repo = ReviewRepository::new(self.pool);

        Ok(AuthorReviews {
            restaurant_reviews: repo.restaurant_reviews_by_author(author_id).await?,
            item_reviews: repo.item_reviews_by_author(author_id).await?,
        })
    }
}
