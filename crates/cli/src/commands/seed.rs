//! Seed the database with sample data for development.
//!
//! Applies migrations, empties every table, then inserts a demo user, a few
//! cached restaurants, one hydrated chain menu, favorites, and reviews so a
//! fresh checkout has data to work with immediately.

use chrono::Utc;
use tracing::info;

use nearbite_core::{ChainId, Coordinates, ProviderItemId, ProviderRestaurantId};
use nearbite_discovery::db::{self, ChainMenuStateRepository, RepositoryError, UserRepository};
use nearbite_discovery::error::DiscoveryError;
use nearbite_discovery::gateways::{FavoritesGateway, ReviewsGateway};
use nearbite_discovery::models::{FavoriteTarget, WeeklyHours};
use nearbite_discovery::provider::{MenuItemSummary, RestaurantSummary};
use nearbite_discovery::reconcile::Reconciler;

/// Deletion order respects foreign keys (children before parents).
const TABLES: [&str; 8] = [
    "restaurant_reviews",
    "item_reviews",
    "restaurant_favorites",
    "item_favorites",
    "menu_items",
    "chain_menu_state",
    "restaurants",
    "users",
];

/// Reset the database and insert sample data.
///
/// # Errors
///
/// Returns an error if the database URL is missing or any database operation
/// fails.
pub async fn run() -> Result<(), DiscoveryError> {
    let pool = super::connect().await?;

    db::MIGRATOR.run(&pool).await?;

    info!("Clearing existing data");
    for table in TABLES {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&pool)
            .await
            .map_err(RepositoryError::from)?;
    }

    let user = UserRepository::new(&pool)
        .create(
            "Demo",
            "User",
            "demo@nearbite.dev",
            "demo-password-hash",
            None,
        )
        .await?;
    info!(user_id = %user.id, "Created demo user");

    let reconciler = Reconciler::new(&pool);

    let restaurants = reconciler.reconcile_restaurants(&sample_restaurants()).await?;
    info!(count = restaurants.len(), "Cached sample restaurants");

    let chain = ChainId::new("Burrito Bros");
    let items = reconciler
        .reconcile_menu_items(&chain, &sample_menu_items(&chain))
        .await?;
    ChainMenuStateRepository::new(&pool)
        .mark_fetched(&chain, Utc::now())
        .await?;
    info!(chain = %chain, count = items.len(), "Hydrated sample menu");

    let Some(restaurant) = restaurants.first() else {
        return Err(
            RepositoryError::DataCorruption("sample restaurants missing after insert".to_owned())
                .into(),
        );
    };

    let favorites = FavoritesGateway::new(&pool);
    favorites
        .toggle(user.id, FavoriteTarget::Restaurant(restaurant.id))
        .await?;

    let reviews = ReviewsGateway::new(&pool);
    reviews
        .create_restaurant_review(
            user.id,
            restaurant.id,
            "Solid burritos",
            "The California burrito is the move. Gets busy around noon.",
        )
        .await?;

    if let Some(item) = items.first() {
        favorites
            .toggle(user.id, FavoriteTarget::MenuItem(item.id))
            .await?;
        reviews
            .create_menu_item_review(
                user.id,
                item.id,
                "Huge portion",
                "Easily splits into two meals.",
            )
            .await?;
    }

    info!("Seed complete");
    Ok(())
}

/// Restaurants shaped like real provider results: two locations of one
/// chain plus an independent spot.
fn sample_restaurants() -> Vec<RestaurantSummary> {
    vec![
        RestaurantSummary {
            provider_id: ProviderRestaurantId::new("res_c3a9f0b1"),
            chain: ChainId::new("Burrito Bros"),
            name: "Burrito Bros - Gaslamp Quarter".to_owned(),
            address: Some("664 Fifth Ave, San Diego, CA, 92101".to_owned()),
            cuisines: Some("Mexican, Tex-Mex".to_owned()),
            description: Some("San Diego style burritos since 2009.".to_owned()),
            phone: Some("(619)-555-0137".to_owned()),
            photo_url: Some("https://images.example.com/burrito-bros-gaslamp.jpg".to_owned()),
            coordinates: Coordinates::new(32.7112, -117.1602).ok(),
            hours: all_week("10:00AM-10:00PM"),
        },
        RestaurantSummary {
            provider_id: ProviderRestaurantId::new("res_d41be7c2"),
            chain: ChainId::new("Burrito Bros"),
            name: "Burrito Bros - Hillcrest".to_owned(),
            address: Some("1045 University Ave, San Diego, CA, 92103".to_owned()),
            cuisines: Some("Mexican, Tex-Mex".to_owned()),
            description: None,
            phone: Some("(619)-555-0242".to_owned()),
            photo_url: None,
            coordinates: Coordinates::new(32.7486, -117.1607).ok(),
            hours: all_week("10:00AM-11:00PM"),
        },
        RestaurantSummary {
            provider_id: ProviderRestaurantId::new("res_92ffae10"),
            chain: ChainId::new("The Salty Pelican"),
            name: "The Salty Pelican".to_owned(),
            address: Some("2855 Perry Rd, San Diego, CA, 92106".to_owned()),
            cuisines: Some("Seafood, American".to_owned()),
            description: Some("Dockside fish house with a rotating daily catch.".to_owned()),
            phone: Some("(619)-555-0926".to_owned()),
            photo_url: Some("https://images.example.com/salty-pelican.jpg".to_owned()),
            coordinates: Coordinates::new(32.7398, -117.2107).ok(),
            hours: all_week("11:00AM-9:00PM"),
        },
    ]
}

fn sample_menu_items(chain: &ChainId) -> Vec<MenuItemSummary> {
    vec![
        MenuItemSummary {
            provider_id: ProviderItemId::new(81001),
            chain: chain.clone(),
            title: "California Burrito".to_owned(),
            image_url: Some("https://images.example.com/california-burrito.jpg".to_owned()),
        },
        MenuItemSummary {
            provider_id: ProviderItemId::new(81002),
            chain: chain.clone(),
            title: "Carne Asada Fries".to_owned(),
            image_url: None,
        },
        MenuItemSummary {
            provider_id: ProviderItemId::new(81003),
            chain: chain.clone(),
            title: "Horchata".to_owned(),
            image_url: None,
        },
    ]
}

fn all_week(hours: &str) -> WeeklyHours {
    let h = || Some(hours.to_owned());
    WeeklyHours {
        sunday: h(),
        monday: h(),
        tuesday: h(),
        wednesday: h(),
        thursday: h(),
        friday: h(),
        saturday: h(),
    }
}
