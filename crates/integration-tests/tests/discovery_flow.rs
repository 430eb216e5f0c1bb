//! End-to-end discovery flows: zip code in, cached restaurants out.
//!
//! The embedding application geocodes first and passes coordinates into
//! nearby search, so these tests do the same.

#![allow(clippy::unwrap_used)]

use nearbite_core::ProviderRestaurantId;
use nearbite_discovery::db::RestaurantRepository;
use nearbite_discovery::error::DiscoveryError;
use nearbite_discovery::geocode::{GeocodeError, Geocoder};
use nearbite_discovery::provider::ProviderError;
use nearbite_discovery::services::DiscoveryService;
use nearbite_integration_tests::{FakeGeocoder, FakeProvider, TestContext, restaurant_summary};

const RADIUS_MILES: f64 = 5.0;

// =============================================================================
// Nearby Search
// =============================================================================

#[tokio::test]
async fn test_nearby_search_caches_all_results() {
    let ctx = TestContext::new().await;
    let geocoder = FakeGeocoder::new().with("90210", 34.0901, -118.4065);
    let provider = FakeProvider::new();
    provider.set_nearby(vec![
        restaurant_summary("res_a", "Chain A", "Chain A - Beverly Hills"),
        restaurant_summary("res_b", "Chain B", "Chain B - Rodeo Dr"),
        restaurant_summary("res_c", "Indie Spot", "Indie Spot"),
    ]);
    let service = DiscoveryService::new(&ctx.pool, &provider);

    let center = geocoder.locate("90210").await.unwrap();
    let results = service.nearby(center, RADIUS_MILES).await.unwrap();

    assert_eq!(results.len(), 3);
    assert_eq!(
        RestaurantRepository::new(&ctx.pool).count().await.unwrap(),
        3
    );

    // Same search again: same rows come back, nothing new is created.
    let again = service.nearby(center, RADIUS_MILES).await.unwrap();
    assert_eq!(
        results.iter().map(|r| r.id).collect::<Vec<_>>(),
        again.iter().map(|r| r.id).collect::<Vec<_>>()
    );
    assert_eq!(
        RestaurantRepository::new(&ctx.pool).count().await.unwrap(),
        3
    );
}

#[tokio::test]
async fn test_unknown_zip_reports_not_found_without_side_effects() {
    let ctx = TestContext::new().await;
    let geocoder = FakeGeocoder::new().with("90210", 34.0901, -118.4065);
    let provider = FakeProvider::new();
    provider.set_nearby(vec![restaurant_summary("res_a", "Chain A", "Chain A")]);

    let err = geocoder.locate("00000").await.unwrap_err();
    assert!(matches!(err, GeocodeError::ZipNotFound(_)));

    // The failed lookup never reached the provider or the store.
    assert_eq!(provider.search_calls(), 0);
    assert_eq!(
        RestaurantRepository::new(&ctx.pool).count().await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_malformed_zip_rejected_by_validation() {
    let geocoder = FakeGeocoder::new().with("90210", 34.0901, -118.4065);

    let err = geocoder.locate("9021").await.unwrap_err();
    assert!(matches!(err, GeocodeError::InvalidZip(_)));

    let err = geocoder.locate("beverly hills").await.unwrap_err();
    assert!(matches!(err, GeocodeError::InvalidZip(_)));
}

#[tokio::test]
async fn test_provider_outage_surfaces_error_and_caches_nothing() {
    let ctx = TestContext::new().await;
    let geocoder = FakeGeocoder::new().with("92101", 32.7157, -117.1611);
    let provider = FakeProvider::new();
    provider.set_nearby(vec![restaurant_summary("res_a", "Chain A", "Chain A")]);
    provider.set_failing(true);
    let service = DiscoveryService::new(&ctx.pool, &provider);

    let center = geocoder.locate("92101").await.unwrap();
    let err = service.nearby(center, RADIUS_MILES).await.unwrap_err();
    assert!(matches!(err, DiscoveryError::Provider(_)));
    assert_eq!(
        RestaurantRepository::new(&ctx.pool).count().await.unwrap(),
        0
    );

    // Clearing the outage makes the same search succeed.
    provider.set_failing(false);
    let results = service.nearby(center, RADIUS_MILES).await.unwrap();
    assert_eq!(results.len(), 1);
}

// =============================================================================
// Detail Lookup
// =============================================================================

#[tokio::test]
async fn test_detail_lookup_fetches_then_serves_from_cache() {
    let ctx = TestContext::new().await;
    let provider = FakeProvider::new();
    provider.set_detail(restaurant_summary("res_d", "Chain D", "Chain D - Downtown"));
    let service = DiscoveryService::new(&ctx.pool, &provider);
    let id = ProviderRestaurantId::new("res_d");

    let first = service.restaurant(&id).await.unwrap();
    assert_eq!(first.provider_id, id);
    assert_eq!(provider.detail_calls(), 1);

    let second = service.restaurant(&id).await.unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(
        provider.detail_calls(),
        1,
        "cached row must not trigger a second fetch"
    );
}

#[tokio::test]
async fn test_detail_lookup_unknown_id_is_not_found() {
    let ctx = TestContext::new().await;
    let provider = FakeProvider::new();
    let service = DiscoveryService::new(&ctx.pool, &provider);

    let err = service
        .restaurant(&ProviderRestaurantId::new("res_missing"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DiscoveryError::Provider(ProviderError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_detail_lookup_row_cached_by_nearby_search() {
    let ctx = TestContext::new().await;
    let provider = FakeProvider::new();
    provider.set_nearby(vec![restaurant_summary("res_e", "Chain E", "Chain E")]);
    let service = DiscoveryService::new(&ctx.pool, &provider);

    let center = nearbite_core::Coordinates::new(32.7157, -117.1611).unwrap();
    service.nearby(center, RADIUS_MILES).await.unwrap();

    // A row cached by search satisfies detail lookups without the provider.
    let cached = service
        .restaurant(&ProviderRestaurantId::new("res_e"))
        .await
        .unwrap();
    assert_eq!(cached.name, "Chain E");
    assert_eq!(provider.detail_calls(), 0);
}
