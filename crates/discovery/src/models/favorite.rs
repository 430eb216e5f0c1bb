//! Favorite domain types.

use nearbite_core::{MenuItemId, RestaurantId};

/// What a favorite points at.
///
/// Favorites are bare (user, target) memberships; there is nothing else to
/// model, so this enum is the whole domain type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FavoriteTarget {
    /// A restaurant location.
    Restaurant(RestaurantId),
    /// A menu item.
    MenuItem(MenuItemId),
}

/// What a toggle invocation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The favorite did not exist and was added.
    Added,
    /// The favorite existed and was removed.
    Removed,
}
