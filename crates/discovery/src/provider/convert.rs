//! Conversions from the provider's wire format into summaries.
//!
//! The formatting rules here (address flattening, phone layout, photo
//! preference, brand fallback) define how provider records look everywhere
//! downstream, since reconciliation stores summary fields verbatim.

use nearbite_core::{ChainId, Coordinates, ProviderItemId, ProviderRestaurantId};

use crate::error::UpstreamError;
use crate::models::WeeklyHours;

use super::types::{WireAddress, WireLocalHours, WireMenuItem, WireRestaurant};
use super::{MenuItemSummary, RestaurantSummary};

impl TryFrom<WireRestaurant> for RestaurantSummary {
    type Error = UpstreamError;

    fn try_from(wire: WireRestaurant) -> Result<Self, Self::Error> {
        let coordinates = convert_coordinates(&wire.id, wire.address.as_ref())?;

        Ok(Self {
            provider_id: ProviderRestaurantId::new(wire.id),
            chain: pick_chain(wire.brand_name, &wire.name),
            address: wire.address.as_ref().and_then(join_address),
            cuisines: join_cuisines(&wire.cuisines),
            phone: wire.phone_number.and_then(format_phone),
            photo_url: pick_photo(wire.store_photos, wire.logo_photos),
            hours: wire
                .local_hours
                .map(WireLocalHours::into_weekly)
                .unwrap_or_default(),
            name: wire.name,
            description: wire.description,
            coordinates,
        })
    }
}

impl WireLocalHours {
    pub(super) fn into_weekly(self) -> WeeklyHours {
        // The provider pads missing days with empty strings.
        let clean = |hours: Option<String>| hours.filter(|h| !h.trim().is_empty());
        let op = self.operational;

        WeeklyHours {
            sunday: clean(op.sunday),
            monday: clean(op.monday),
            tuesday: clean(op.tuesday),
            wednesday: clean(op.wednesday),
            thursday: clean(op.thursday),
            friday: clean(op.friday),
            saturday: clean(op.saturday),
        }
    }
}

impl WireMenuItem {
    /// Exact chain match. Menu search is a text search, so a "Burger King"
    /// query also surfaces "Burger Street" items.
    pub(super) fn matches_chain(&self, chain: &ChainId) -> bool {
        self.restaurant_chain.as_deref() == Some(chain.as_str())
    }

    pub(super) fn into_summary(self, chain: &ChainId) -> MenuItemSummary {
        MenuItemSummary {
            provider_id: ProviderItemId::new(self.id),
            chain: chain.clone(),
            title: self.title,
            image_url: self.image,
        }
    }
}

/// Map the provider's address coordinates, if any, into validated
/// [`Coordinates`].
///
/// Latitude without longitude (or vice versa) is treated as a malformed
/// payload rather than silently dropped.
fn convert_coordinates(
    id: &str,
    address: Option<&WireAddress>,
) -> Result<Option<Coordinates>, UpstreamError> {
    let Some(address) = address else {
        return Ok(None);
    };

    match (address.lat, address.lon) {
        (Some(lat), Some(lon)) => Coordinates::new(lat, lon).map(Some).map_err(|e| {
            UpstreamError::Payload(format!("restaurant {id}: unusable coordinates: {e}"))
        }),
        (None, None) => Ok(None),
        _ => Err(UpstreamError::Payload(format!(
            "restaurant {id}: latitude and longitude must come together"
        ))),
    }
}

/// Chains come back as `brand_name`; independents leave it blank and count
/// as a chain of one under their own name.
fn pick_chain(brand_name: Option<String>, name: &str) -> ChainId {
    match brand_name {
        Some(brand) if !brand.trim().is_empty() => ChainId::new(brand),
        _ => ChainId::new(name),
    }
}

/// Join the populated address parts into one display line.
fn join_address(address: &WireAddress) -> Option<String> {
    let parts: Vec<&str> = [
        address.street_addr.as_deref(),
        address.city.as_deref(),
        address.state.as_deref(),
        address.zipcode.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn join_cuisines(cuisines: &[String]) -> Option<String> {
    if cuisines.is_empty() {
        None
    } else {
        Some(cuisines.join(", "))
    }
}

/// Best photo for a location: first store photo, else first logo.
fn pick_photo(store_photos: Vec<String>, logo_photos: Vec<String>) -> Option<String> {
    store_photos
        .into_iter()
        .next()
        .or_else(|| logo_photos.into_iter().next())
}

/// Format the provider's numeric phone number for display.
///
/// Ten digits render as `(858)-857-9476`, eleven (with country code) as
/// `1-(858)-857-9476`. Anything else is unusable.
fn format_phone(phone_number: u64) -> Option<String> {
    let digits = phone_number.to_string();

    match digits.len() {
        10 => {
            let (area, rest) = digits.split_at(3);
            let (exchange, line) = rest.split_at(3);
            Some(format!("({area})-{exchange}-{line}"))
        }
        11 => {
            let (country, rest) = digits.split_at(1);
            let (area, rest) = rest.split_at(3);
            let (exchange, line) = rest.split_at(3);
            Some(format!("{country}-({area})-{exchange}-{line}"))
        }
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::types::{DetailResponse, MenuSearchResponse, SearchResponse};
    use super::*;

    #[test]
    fn test_format_phone_ten_digits() {
        assert_eq!(
            format_phone(8_588_579_476),
            Some("(858)-857-9476".to_string())
        );
    }

    #[test]
    fn test_format_phone_eleven_digits() {
        assert_eq!(
            format_phone(18_588_579_476),
            Some("1-(858)-857-9476".to_string())
        );
    }

    #[test]
    fn test_format_phone_rejects_other_lengths() {
        assert_eq!(format_phone(911), None);
        assert_eq!(format_phone(858_857_947_612), None);
    }

    #[test]
    fn test_pick_chain_prefers_brand() {
        let chain = pick_chain(Some("Pizza Hut".to_string()), "Pizza Hut #4821");
        assert_eq!(chain.as_str(), "Pizza Hut");
    }

    #[test]
    fn test_pick_chain_falls_back_to_name() {
        assert_eq!(pick_chain(None, "Mario's Trattoria").as_str(), "Mario's Trattoria");
        assert_eq!(
            pick_chain(Some("  ".to_string()), "Mario's Trattoria").as_str(),
            "Mario's Trattoria"
        );
    }

    #[test]
    fn test_join_address_all_parts() {
        let address = WireAddress {
            street_addr: Some("123 Main St".to_string()),
            city: Some("San Diego".to_string()),
            state: Some("CA".to_string()),
            zipcode: Some("92130".to_string()),
            lat: None,
            lon: None,
        };

        assert_eq!(
            join_address(&address),
            Some("123 Main St, San Diego, CA, 92130".to_string())
        );
    }

    #[test]
    fn test_join_address_skips_missing_parts() {
        let address = WireAddress {
            street_addr: None,
            city: Some("San Diego".to_string()),
            state: Some("CA".to_string()),
            zipcode: None,
            lat: None,
            lon: None,
        };

        assert_eq!(join_address(&address), Some("San Diego, CA".to_string()));
    }

    #[test]
    fn test_join_address_empty() {
        let address = WireAddress {
            street_addr: None,
            city: None,
            state: None,
            zipcode: None,
            lat: None,
            lon: None,
        };

        assert_eq!(join_address(&address), None);
    }

    #[test]
    fn test_pick_photo_prefers_store_photos() {
        let photo = pick_photo(
            vec!["store1.jpg".to_string(), "store2.jpg".to_string()],
            vec!["logo1.jpg".to_string()],
        );
        assert_eq!(photo, Some("store1.jpg".to_string()));
    }

    #[test]
    fn test_pick_photo_falls_back_to_logo() {
        let photo = pick_photo(vec![], vec!["logo1.jpg".to_string()]);
        assert_eq!(photo, Some("logo1.jpg".to_string()));

        assert_eq!(pick_photo(vec![], vec![]), None);
    }

    #[test]
    fn test_convert_coordinates_rejects_partial_pair() {
        let address = WireAddress {
            street_addr: None,
            city: None,
            state: None,
            zipcode: None,
            lat: Some(32.9),
            lon: None,
        };

        let result = convert_coordinates("abc", Some(&address));

        assert!(matches!(result, Err(UpstreamError::Payload(_))));
    }

    #[test]
    fn test_search_response_to_summary() {
        let json = r#"{
            "restaurants": [
                {
                    "_id": "5e91e5e4c6c8431f9e0a8a2e",
                    "name": "Taco Stand #12",
                    "brand_name": "The Taco Stand",
                    "phone_number": 8588579476,
                    "address": {
                        "street_addr": "621 Pearl St",
                        "city": "La Jolla",
                        "state": "CA",
                        "zipcode": "92037",
                        "country": "US",
                        "lat": 32.8473,
                        "lon": -117.2742
                    },
                    "cuisines": ["Mexican", "Tacos"],
                    "description": "Authentic Tijuana-style street tacos.",
                    "local_hours": {
                        "operational": {
                            "Monday": "7:00AM - 10:00PM",
                            "Tuesday": "7:00AM - 10:00PM",
                            "Wednesday": "",
                            "Sunday": "8:00AM - 9:00PM"
                        }
                    },
                    "store_photos": ["https://img.example/store.jpg"],
                    "logo_photos": ["https://img.example/logo.jpg"],
                    "dollar_signs": 1,
                    "is_open": true
                }
            ]
        }"#;

        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        let summary =
            RestaurantSummary::try_from(parsed.restaurants.into_iter().next().unwrap()).unwrap();

        assert_eq!(summary.provider_id.as_str(), "5e91e5e4c6c8431f9e0a8a2e");
        assert_eq!(summary.chain.as_str(), "The Taco Stand");
        assert_eq!(summary.name, "Taco Stand #12");
        assert_eq!(
            summary.address.as_deref(),
            Some("621 Pearl St, La Jolla, CA, 92037")
        );
        assert_eq!(summary.cuisines.as_deref(), Some("Mexican, Tacos"));
        assert_eq!(summary.phone.as_deref(), Some("(858)-857-9476"));
        assert_eq!(
            summary.photo_url.as_deref(),
            Some("https://img.example/store.jpg")
        );

        let coordinates = summary.coordinates.unwrap();
        assert!((coordinates.latitude() - 32.8473).abs() < f64::EPSILON);
        assert!((coordinates.longitude() - -117.2742).abs() < f64::EPSILON);

        assert_eq!(summary.hours.monday.as_deref(), Some("7:00AM - 10:00PM"));
        assert_eq!(summary.hours.wednesday, None, "blank hours treated as absent");
        assert_eq!(summary.hours.sunday.as_deref(), Some("8:00AM - 9:00PM"));
    }

    #[test]
    fn test_sparse_restaurant_to_summary() {
        // Independents can come back with little more than a name.
        let json = r#"{"restaurant": {"_id": "abc123", "name": "Mario's Trattoria"}}"#;

        let parsed: DetailResponse = serde_json::from_str(json).unwrap();
        let summary = RestaurantSummary::try_from(parsed.restaurant).unwrap();

        assert_eq!(summary.chain.as_str(), "Mario's Trattoria");
        assert_eq!(summary.address, None);
        assert_eq!(summary.coordinates, None);
        assert!(summary.hours.is_empty());
    }

    #[test]
    fn test_menu_search_filter_is_exact() {
        let json = r#"{
            "menuItems": [
                {"id": 419357, "title": "Burger Sliders", "image": "https://img.example/sliders.jpg", "imageType": "jpg", "restaurantChain": "Hooters"},
                {"id": 424571, "title": "Buffalo Shrimp", "image": null, "imageType": "jpg", "restaurantChain": "Hooters"},
                {"id": 411090, "title": "Crispy Tenders", "image": "https://img.example/tenders.jpg", "imageType": "jpg", "restaurantChain": "Hooters Express"}
            ],
            "totalMenuItems": 4458,
            "type": "menuItem",
            "offset": 0,
            "number": 3
        }"#;

        let chain = ChainId::new("Hooters");
        let parsed: MenuSearchResponse = serde_json::from_str(json).unwrap();
        let items: Vec<MenuItemSummary> = parsed
            .menu_items
            .into_iter()
            .filter(|item| item.matches_chain(&chain))
            .map(|item| item.into_summary(&chain))
            .collect();

        assert_eq!(items.len(), 2, "near-miss chains are discarded");
        assert_eq!(items.first().unwrap().provider_id.as_i64(), 419_357);
        assert_eq!(items.first().unwrap().title, "Burger Sliders");
        assert_eq!(items.get(1).unwrap().image_url, None);
    }
}
