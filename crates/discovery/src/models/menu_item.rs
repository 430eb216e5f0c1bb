//! Menu item domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use nearbite_core::{ChainId, MenuItemId, ProviderItemId};

/// A menu item cached in the local store.
///
/// Items belong to a chain, not to a single location: viewing any location of
/// a chain surfaces the same catalog.
#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    /// Local row ID.
    pub id: MenuItemId,
    /// Provider-assigned numeric key, stored verbatim.
    pub provider_id: ProviderItemId,
    /// Chain whose catalog this item belongs to.
    pub chain: ChainId,
    /// Item title, e.g. `"Whopper"`.
    pub title: String,
    /// Product photo.
    pub image_url: Option<String>,
    /// When this row was first cached.
    pub created_at: DateTime<Utc>,
}

/// Whether a chain's menu catalog has ever been pulled from the provider.
///
/// `Fetched` with zero stored items means the chain genuinely has no menu
/// data upstream; that is a different situation from `NotFetched`, and only
/// the latter triggers a provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFetchStatus {
    /// No fetch has ever been recorded for this chain.
    NotFetched,
    /// The catalog was fetched at the given time (possibly empty).
    Fetched {
        /// When the most recent fetch completed.
        at: DateTime<Utc>,
    },
}

impl MenuFetchStatus {
    /// True if a fetch has been recorded.
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched { .. })
    }
}
