//! Lazy per-chain menu hydration: the first explicit view pulls from the
//! provider, everything after serves the local store.

#![allow(clippy::unwrap_used)]

use nearbite_core::{ChainId, ProviderItemId};
use nearbite_discovery::db::{ChainMenuStateRepository, MenuItemRepository};
use nearbite_discovery::error::DiscoveryError;
use nearbite_discovery::models::MenuFetchStatus;
use nearbite_discovery::services::DiscoveryService;
use nearbite_integration_tests::{FakeProvider, TestContext, menu_item_summary};

// =============================================================================
// Lazy Hydration
// =============================================================================

#[tokio::test]
async fn test_first_view_hydrates_exactly_once() {
    let ctx = TestContext::new().await;
    let provider = FakeProvider::new();
    let chain = ChainId::new("Burger Town");
    provider.set_menu(
        &chain,
        vec![
            menu_item_summary(1, "Burger Town", "Classic Burger"),
            menu_item_summary(2, "Burger Town", "Onion Rings"),
        ],
    );
    let service = DiscoveryService::new(&ctx.pool, &provider);

    let status = ChainMenuStateRepository::new(&ctx.pool)
        .fetch_status(&chain)
        .await
        .unwrap();
    assert_eq!(status, MenuFetchStatus::NotFetched);

    let first = service.menu_for_chain(&chain).await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(provider.menu_calls(), 1);

    let second = service.menu_for_chain(&chain).await.unwrap();
    assert_eq!(second.len(), 2);
    assert_eq!(
        provider.menu_calls(),
        1,
        "a hydrated chain must not hit the provider again"
    );

    let status = ChainMenuStateRepository::new(&ctx.pool)
        .fetch_status(&chain)
        .await
        .unwrap();
    assert!(status.is_fetched());
}

#[tokio::test]
async fn test_menu_order_matches_first_hydration() {
    let ctx = TestContext::new().await;
    let provider = FakeProvider::new();
    let chain = ChainId::new("Burger Town");
    provider.set_menu(
        &chain,
        vec![
            menu_item_summary(1, "Burger Town", "a"),
            menu_item_summary(2, "Burger Town", "b"),
            menu_item_summary(3, "Burger Town", "c"),
        ],
    );
    let service = DiscoveryService::new(&ctx.pool, &provider);

    let first = service.menu_for_chain(&chain).await.unwrap();
    let second = service.menu_for_chain(&chain).await.unwrap();

    let titles = |items: &[nearbite_discovery::models::MenuItem]| {
        items.iter().map(|i| i.title.clone()).collect::<Vec<_>>()
    };
    assert_eq!(titles(&first), ["a", "b", "c"]);
    assert_eq!(titles(&second), ["a", "b", "c"]);
}

#[tokio::test]
async fn test_empty_menu_is_distinguishable_from_never_fetched() {
    let ctx = TestContext::new().await;
    let provider = FakeProvider::new();
    let chain = ChainId::new("No Menu Diner");
    // No set_menu call: the provider has nothing for this chain.
    let service = DiscoveryService::new(&ctx.pool, &provider);

    let items = service.menu_for_chain(&chain).await.unwrap();
    assert!(items.is_empty());
    assert_eq!(provider.menu_calls(), 1);

    // The empty answer was recorded, so the next view is served locally.
    let items = service.menu_for_chain(&chain).await.unwrap();
    assert!(items.is_empty());
    assert_eq!(provider.menu_calls(), 1);
}

#[tokio::test]
async fn test_failed_hydration_leaves_chain_unfetched() {
    let ctx = TestContext::new().await;
    let provider = FakeProvider::new();
    let chain = ChainId::new("Burger Town");
    provider.set_menu(&chain, vec![menu_item_summary(1, "Burger Town", "Burger")]);
    provider.set_failing(true);
    let service = DiscoveryService::new(&ctx.pool, &provider);

    let err = service.menu_for_chain(&chain).await.unwrap_err();
    assert!(matches!(err, DiscoveryError::Provider(_)));

    let status = ChainMenuStateRepository::new(&ctx.pool)
        .fetch_status(&chain)
        .await
        .unwrap();
    assert_eq!(
        status,
        MenuFetchStatus::NotFetched,
        "a failed fetch must not be recorded as done"
    );

    // The next view retries and succeeds.
    provider.set_failing(false);
    let items = service.menu_for_chain(&chain).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(provider.menu_calls(), 2);
}

// =============================================================================
// Cross-Chain Collisions
// =============================================================================

#[tokio::test]
async fn test_cross_chain_item_skipped_but_rest_kept() {
    let ctx = TestContext::new().await;
    let provider = FakeProvider::new();
    let chain = ChainId::new("Burger Town");
    provider.set_menu(
        &chain,
        vec![
            menu_item_summary(1, "Burger Town", "Classic Burger"),
            menu_item_summary(2, "Taco Town", "Street Tacos"),
            menu_item_summary(3, "Burger Town", "Onion Rings"),
        ],
    );
    let service = DiscoveryService::new(&ctx.pool, &provider);

    let items = service.menu_for_chain(&chain).await.unwrap();

    let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, ["Classic Burger", "Onion Rings"]);
    assert_eq!(MenuItemRepository::new(&ctx.pool).count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_item_already_cached_under_another_chain_stays_there() {
    let ctx = TestContext::new().await;
    let provider = FakeProvider::new();
    let burger = ChainId::new("Burger Town");
    let taco = ChainId::new("Taco Town");
    provider.set_menu(&burger, vec![menu_item_summary(7, "Burger Town", "Fries")]);
    // Same provider id later shows up under a different chain.
    provider.set_menu(&taco, vec![menu_item_summary(7, "Taco Town", "Fries")]);
    let service = DiscoveryService::new(&ctx.pool, &provider);

    service.menu_for_chain(&burger).await.unwrap();
    let taco_items = service.menu_for_chain(&taco).await.unwrap();

    assert!(taco_items.is_empty());
    let cached = MenuItemRepository::new(&ctx.pool)
        .find_by_provider_id(ProviderItemId::new(7))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cached.chain.as_str(), "Burger Town");
}

// =============================================================================
// Explicit Refresh
// =============================================================================

#[tokio::test]
async fn test_refresh_menu_overwrites_item_fields() {
    let ctx = TestContext::new().await;
    let provider = FakeProvider::new();
    let chain = ChainId::new("Burger Town");
    provider.set_menu(
        &chain,
        vec![menu_item_summary(1, "Burger Town", "Classic Burger")],
    );
    let service = DiscoveryService::new(&ctx.pool, &provider);

    service.menu_for_chain(&chain).await.unwrap();

    // Upstream renamed the item; only refresh picks that up.
    let mut renamed = menu_item_summary(1, "Burger Town", "Double Classic Burger");
    renamed.image_url = Some("https://images.example.com/double.jpg".to_owned());
    provider.set_menu(&chain, vec![renamed]);

    let cached = service.menu_for_chain(&chain).await.unwrap();
    assert_eq!(cached.first().unwrap().title, "Classic Burger");

    let refreshed = service.refresh_menu_for_chain(&chain).await.unwrap();
    assert_eq!(refreshed.first().unwrap().title, "Double Classic Burger");
    assert_eq!(MenuItemRepository::new(&ctx.pool).count().await.unwrap(), 1);
}
