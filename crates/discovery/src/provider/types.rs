//! Wire types for the food API's JSON payloads.
//!
//! Deserialization targets only; nothing here leaves the provider module.
//! Unknown fields are ignored, and collection fields default to empty so a
//! sparse independent-restaurant record still parses.

use serde::Deserialize;

/// Nearby-search response envelope.
#[derive(Debug, Deserialize)]
pub(super) struct SearchResponse {
    #[serde(default)]
    pub(super) restaurants: Vec<WireRestaurant>,
}

/// Single-restaurant response envelope.
#[derive(Debug, Deserialize)]
pub(super) struct DetailResponse {
    pub(super) restaurant: WireRestaurant,
}

/// A restaurant as the provider serializes it.
#[derive(Debug, Deserialize)]
pub(super) struct WireRestaurant {
    #[serde(rename = "_id")]
    pub(super) id: String,
    pub(super) name: String,
    pub(super) brand_name: Option<String>,
    pub(super) phone_number: Option<u64>,
    pub(super) address: Option<WireAddress>,
    #[serde(default)]
    pub(super) cuisines: Vec<String>,
    pub(super) description: Option<String>,
    pub(super) local_hours: Option<WireLocalHours>,
    #[serde(default)]
    pub(super) store_photos: Vec<String>,
    #[serde(default)]
    pub(super) logo_photos: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireAddress {
    pub(super) street_addr: Option<String>,
    pub(super) city: Option<String>,
    pub(super) state: Option<String>,
    pub(super) zipcode: Option<String>,
    pub(super) lat: Option<f64>,
    pub(super) lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireLocalHours {
    #[serde(default)]
    pub(super) operational: WireOperationalHours,
}

/// Hours keyed by capitalized weekday names, as the provider sends them.
#[derive(Debug, Default, Deserialize)]
pub(super) struct WireOperationalHours {
    #[serde(rename = "Sunday")]
    pub(super) sunday: Option<String>,
    #[serde(rename = "Monday")]
    pub(super) monday: Option<String>,
    #[serde(rename = "Tuesday")]
    pub(super) tuesday: Option<String>,
    #[serde(rename = "Wednesday")]
    pub(super) wednesday: Option<String>,
    #[serde(rename = "Thursday")]
    pub(super) thursday: Option<String>,
    #[serde(rename = "Friday")]
    pub(super) friday: Option<String>,
    #[serde(rename = "Saturday")]
    pub(super) saturday: Option<String>,
}

/// Menu-search response envelope.
#[derive(Debug, Deserialize)]
pub(super) struct MenuSearchResponse {
    #[serde(rename = "menuItems", default)]
    pub(super) menu_items: Vec<WireMenuItem>,
}

/// A menu item as the provider serializes it.
#[derive(Debug, Deserialize)]
pub(super) struct WireMenuItem {
    pub(super) id: i64,
    pub(super) title: String,
    pub(super) image: Option<String>,
    #[serde(rename = "restaurantChain")]
    pub(super) restaurant_chain: Option<String>,
}
