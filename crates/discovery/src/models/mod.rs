//! Domain models for discovery.
//!
//! These types represent validated domain objects separate from database row
//! types. Rows live next to their repositories in [`crate::db`]; everything
//! here is what the rest of the crate (and the embedding application) works
//! with.

pub mod favorite;
pub mod menu_item;
pub mod restaurant;
pub mod review;
pub mod user;

pub use favorite::{FavoriteTarget, ToggleOutcome};
pub use menu_item::{MenuFetchStatus, MenuItem};
pub use restaurant::{Restaurant, WeeklyHours};
pub use review::{ItemReview, RestaurantReview};
pub use user::{User, UserLocation};
