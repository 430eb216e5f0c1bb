//! Restaurant domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nearbite_core::{ChainId, Coordinates, ProviderRestaurantId, RestaurantId};

/// A restaurant location cached in the local store.
///
/// One row per physical location. The `provider_id` is the provider's
/// permanent key and is what reconciliation matches on; `id` is ours and is
/// what reviews and favorites reference.
#[derive(Debug, Clone, Serialize)]
pub struct Restaurant {
    /// Local row ID.
    pub id: RestaurantId,
    /// Provider-assigned permanent key, stored verbatim.
    pub provider_id: ProviderRestaurantId,
    /// Chain (brand) this location belongs to. Independent restaurants are
    /// their own chain.
    pub chain: ChainId,
    /// Display name of the location.
    pub name: String,
    /// Single-line street address, if the provider supplied one.
    pub address: Option<String>,
    /// Comma-separated cuisine labels, e.g. `"Pizza, Italian"`.
    pub cuisines: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Formatted phone number, e.g. `"(858)-857-9476"`.
    pub phone: Option<String>,
    /// Best available photo (store photo preferred over logo).
    pub photo_url: Option<String>,
    /// Where this location is on the map.
    pub coordinates: Option<Coordinates>,
    /// Opening hours by weekday.
    pub hours: WeeklyHours,
    /// When this row was first cached.
    pub created_at: DateTime<Utc>,
}

/// Opening hours, one human-readable line per weekday.
///
/// Kept as the provider's display strings (e.g. `"11:00 AM - 10:00 PM"`);
/// nothing downstream needs them machine-readable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyHours {
    pub sunday: Option<String>,
    pub monday: Option<String>,
    pub tuesday: Option<String>,
    pub wednesday: Option<String>,
    pub thursday: Option<String>,
    pub friday: Option<String>,
    pub saturday: Option<String>,
}

impl WeeklyHours {
    /// True if no weekday has hours recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sunday.is_none()
            && self.monday.is_none()
            && self.tuesday.is_none()
            && self.wednesday.is_none()
            && self.thursday.is_none()
            && self.friday.is_none()
            && self.saturday.is_none()
    }
}
