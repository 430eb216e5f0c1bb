//! End-to-end nearby lookup against the real upstream APIs.

use tracing::info;

use nearbite_discovery::config::DiscoveryConfig;
use nearbite_discovery::error::DiscoveryError;
use nearbite_discovery::geocode::Geocoder;
use nearbite_discovery::state::AppState;

/// Geocode a zip code and list nearby restaurants.
///
/// Prints cached rows by local ID, so running the same search twice shows
/// reconciliation reusing the first run's rows.
///
/// # Errors
///
/// Returns an error if configuration is incomplete, either upstream call
/// fails, or the local store rejects the results.
pub async fn run(zip: &str, radius: Option<f64>) -> Result<(), DiscoveryError> {
    let config = DiscoveryConfig::from_env()?;
    let radius_miles = radius.unwrap_or(config.search_radius_miles);

    let state = AppState::new(config).await?;
    state.run_migrations().await?;

    let center = state.geocoder().locate(zip).await?;
    info!(%center, radius_miles, "Searching for nearby restaurants");

    let restaurants = state.discovery().nearby(center, radius_miles).await?;

    #[allow(clippy::print_stdout)]
    {
        println!(
            "{} restaurants within {radius_miles} miles of {zip}:",
            restaurants.len()
        );
        for restaurant in &restaurants {
            println!(
                "  [{}] {} ({})",
                restaurant.id, restaurant.name, restaurant.chain
            );
            if let Some(address) = &restaurant.address {
                println!("      {address}");
            }
        }
    }

    Ok(())
}
