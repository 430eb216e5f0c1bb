//! Review domain types.
//!
//! Reviews target either a restaurant location or a menu item. The two kinds
//! have identical shapes but live in separate tables with separate ID spaces,
//! so they are separate types; a `RestaurantReviewId` can never be passed
//! where an `ItemReviewId` belongs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use nearbite_core::{ItemReviewId, MenuItemId, RestaurantId, RestaurantReviewId, UserId};

/// A review of a restaurant location.
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantReview {
    /// Unique review ID.
    pub id: RestaurantReviewId,
    /// Who wrote it.
    pub author_id: UserId,
    /// The location being reviewed.
    pub restaurant_id: RestaurantId,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// When the review was posted.
    pub created_at: DateTime<Utc>,
}

/// A review of a menu item.
#[derive(Debug, Clone, Serialize)]
pub struct ItemReview {
    /// Unique review ID.
    pub id: ItemReviewId,
    /// Who wrote it.
    pub author_id: UserId,
    /// The menu item being reviewed.
    pub item_id: MenuItemId,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub content: String,
    /// When the review was posted.
    pub created_at: DateTime<Utc>,
}
