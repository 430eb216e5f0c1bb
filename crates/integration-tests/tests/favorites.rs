//! Favorite toggle semantics and per-user listings.

#![allow(clippy::unwrap_used)]

use nearbite_core::{ChainId, RestaurantId};
use nearbite_discovery::gateways::{FavoritesGateway, GatewayError};
use nearbite_discovery::models::{FavoriteTarget, Restaurant, ToggleOutcome};
use nearbite_discovery::reconcile::Reconciler;
use nearbite_integration_tests::{TestContext, menu_item_summary, restaurant_summary};

async fn seed_restaurant(ctx: &TestContext, provider_id: &str, name: &str) -> Restaurant {
    Reconciler::new(&ctx.pool)
        .reconcile_restaurants(&[restaurant_summary(provider_id, name, name)])
        .await
        .unwrap()
        .pop()
        .unwrap()
}

// =============================================================================
// Toggle Semantics
// =============================================================================

#[tokio::test]
async fn test_toggle_adds_then_removes_with_no_residual_membership() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("ana@example.com").await;
    let restaurant = seed_restaurant(&ctx, "res_a", "Chain A").await;
    let target = FavoriteTarget::Restaurant(restaurant.id);
    let gateway = FavoritesGateway::new(&ctx.pool);

    assert_eq!(
        gateway.toggle(user.id, target).await.unwrap(),
        ToggleOutcome::Added
    );
    assert!(gateway.is_favorite(user.id, target).await.unwrap());

    assert_eq!(
        gateway.toggle(user.id, target).await.unwrap(),
        ToggleOutcome::Removed
    );
    assert!(!gateway.is_favorite(user.id, target).await.unwrap());
    assert!(
        gateway
            .favorite_restaurants(user.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_toggle_cycle_ends_where_it_started() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("ana@example.com").await;
    let restaurant = seed_restaurant(&ctx, "res_a", "Chain A").await;
    let target = FavoriteTarget::Restaurant(restaurant.id);
    let gateway = FavoritesGateway::new(&ctx.pool);

    for _ in 0..2 {
        assert_eq!(
            gateway.toggle(user.id, target).await.unwrap(),
            ToggleOutcome::Added
        );
        assert_eq!(
            gateway.toggle(user.id, target).await.unwrap(),
            ToggleOutcome::Removed
        );
    }
}

#[tokio::test]
async fn test_toggle_missing_target_is_not_found() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("ana@example.com").await;
    let gateway = FavoritesGateway::new(&ctx.pool);

    let err = gateway
        .toggle(user.id, FavoriteTarget::Restaurant(RestaurantId::new(9999)))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::NotFound));
}

// =============================================================================
// Listings
// =============================================================================

#[tokio::test]
async fn test_favorite_restaurants_listed_newest_first() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("ana@example.com").await;
    let first = seed_restaurant(&ctx, "res_a", "Chain A").await;
    let second = seed_restaurant(&ctx, "res_b", "Chain B").await;
    let gateway = FavoritesGateway::new(&ctx.pool);

    gateway
        .toggle(user.id, FavoriteTarget::Restaurant(first.id))
        .await
        .unwrap();
    gateway
        .toggle(user.id, FavoriteTarget::Restaurant(second.id))
        .await
        .unwrap();

    let listed: Vec<_> = gateway
        .favorite_restaurants(user.id)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(listed, [second.id, first.id]);
}

#[tokio::test]
async fn test_menu_item_favorites_round_trip() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("ana@example.com").await;
    let chain = ChainId::new("Burger Town");
    let items = Reconciler::new(&ctx.pool)
        .reconcile_menu_items(&chain, &[menu_item_summary(1, "Burger Town", "Burger")])
        .await
        .unwrap();
    let target = FavoriteTarget::MenuItem(items.first().unwrap().id);
    let gateway = FavoritesGateway::new(&ctx.pool);

    gateway.toggle(user.id, target).await.unwrap();
    let listed = gateway.favorite_menu_items(user.id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed.first().unwrap().title, "Burger");

    gateway.toggle(user.id, target).await.unwrap();
    assert!(gateway.favorite_menu_items(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_favorites_are_scoped_per_user() {
    let ctx = TestContext::new().await;
    let ana = ctx.create_user("ana@example.com").await;
    let ben = ctx.create_user("ben@example.com").await;
    let restaurant = seed_restaurant(&ctx, "res_a", "Chain A").await;
    let target = FavoriteTarget::Restaurant(restaurant.id);
    let gateway = FavoritesGateway::new(&ctx.pool);

    gateway.toggle(ana.id, target).await.unwrap();

    assert!(gateway.is_favorite(ana.id, target).await.unwrap());
    assert!(!gateway.is_favorite(ben.id, target).await.unwrap());
    assert!(gateway.favorite_restaurants(ben.id).await.unwrap().is_empty());

    // Ben removing nothing leaves Ana's favorite alone.
    gateway.toggle(ben.id, target).await.unwrap();
    gateway.toggle(ben.id, target).await.unwrap();
    assert!(gateway.is_favorite(ana.id, target).await.unwrap());
}
