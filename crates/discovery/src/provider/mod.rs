//! Food-data provider client.
//!
//! The provider is the external source of truth for restaurants and menus.
//! We call it live for searches, then reconcile what it returns into the
//! local store; nothing from here is served out of process memory.
//!
//! [`FoodDataProvider`] is the seam the rest of the crate programs against.
//! [`SpoonacularClient`] is the production implementation; tests substitute
//! scripted fakes.

mod convert;
mod spoonacular;
mod types;

pub use spoonacular::SpoonacularClient;

use std::future::Future;

use thiserror::Error;

use nearbite_core::{ChainId, Coordinates, ProviderItemId, ProviderRestaurantId};

use crate::error::UpstreamError;
use crate::models::WeeklyHours;

/// Errors that can occur when talking to the food-data provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider has no restaurant with this identifier.
    #[error("restaurant {0} not found upstream")]
    NotFound(ProviderRestaurantId),

    /// The provider could not be reached or answered nonsense.
    #[error("provider unavailable: {0}")]
    Unavailable(#[from] UpstreamError),
}

/// A restaurant location as reported by the provider, normalized for the
/// local store.
///
/// The same shape comes back from nearby searches and from detail lookups;
/// the provider does not distinguish the two. Reconciliation consumes these.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantSummary {
    /// Provider-assigned permanent key.
    pub provider_id: ProviderRestaurantId,
    /// Chain the location belongs to (brand name, falling back to the
    /// location name for independents).
    pub chain: ChainId,
    /// Display name.
    pub name: String,
    /// Single-line street address.
    pub address: Option<String>,
    /// Comma-separated cuisine labels.
    pub cuisines: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Formatted phone number.
    pub phone: Option<String>,
    /// Best available photo.
    pub photo_url: Option<String>,
    /// Map position.
    pub coordinates: Option<Coordinates>,
    /// Opening hours by weekday.
    pub hours: WeeklyHours,
}

/// A menu item as reported by the provider, normalized for the local store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemSummary {
    /// Provider-assigned numeric key.
    pub provider_id: ProviderItemId,
    /// Chain whose catalog the item belongs to.
    pub chain: ChainId,
    /// Item title.
    pub title: String,
    /// Product photo.
    pub image_url: Option<String>,
}

/// Abstraction over the upstream food-data API.
///
/// Implementations must be cheap to call concurrently through `&self`.
pub trait FoodDataProvider {
    /// Search for restaurants around a point.
    ///
    /// Returns summaries in the provider's relevance order; callers preserve
    /// that order through reconciliation.
    fn search_nearby(
        &self,
        center: Coordinates,
        radius_miles: f64,
    ) -> impl Future<Output = Result<Vec<RestaurantSummary>, ProviderError>> + Send;

    /// Fetch one restaurant by its provider identifier.
    fn restaurant_detail(
        &self,
        id: &ProviderRestaurantId,
    ) -> impl Future<Output = Result<RestaurantSummary, ProviderError>> + Send;

    /// Fetch the menu catalog for a chain.
    ///
    /// Only items whose chain matches exactly are returned; an empty Vec is a
    /// legitimate answer, not an error.
    fn menu_items(
        &self,
        chain: &ChainId,
    ) -> impl Future<Output = Result<Vec<MenuItemSummary>, ProviderError>> + Send;
}
