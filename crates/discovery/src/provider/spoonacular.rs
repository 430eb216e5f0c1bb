//! Spoonacular food API client implementation.
//!
//! Three endpoints, all plain GET + JSON:
//!
//! - `/food/restaurants/search?lat=..&lng=..&distance=..` for nearby search
//! - `/food/restaurants/{id}` for a single location
//! - `/food/menuItems/search?query=<chain>&number=100` for a chain's catalog
//!
//! Payload shapes live in [`super::types`], conversions in
//! [`super::convert`].

use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use nearbite_core::{ChainId, Coordinates, ProviderRestaurantId};

use crate::config::SpoonacularConfig;
use crate::error::UpstreamError;

use super::types::{DetailResponse, MenuSearchResponse, SearchResponse};
use super::{FoodDataProvider, MenuItemSummary, ProviderError, RestaurantSummary};

/// Menu page size. The provider caps a single page at 100 items.
const MENU_PAGE_SIZE: u32 = 100;

// =============================================================================
// SpoonacularClient
// =============================================================================

/// Client for the Spoonacular food API.
#[derive(Clone)]
pub struct SpoonacularClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SpoonacularClient {
    /// Create a new food API client.
    #[must_use]
    pub fn new(config: &SpoonacularConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.expose_secret().to_string(),
        }
    }

    /// Execute a GET request against the API and parse the JSON response.
    async fn get_json<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T, UpstreamError>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(&[("apiKey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            // The query string carries the API key; strip the URL before
            // the error can reach a log line.
            .map_err(|e| UpstreamError::Http(e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Http(e.without_url()))?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                path,
                body = %body.chars().take(500).collect::<String>(),
                "provider returned non-success status"
            );
            return Err(UpstreamError::Status(status));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                path,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse provider response"
            );
            UpstreamError::Parse(e)
        })
    }
}

impl FoodDataProvider for SpoonacularClient {
    #[instrument(skip(self), fields(center = %center, radius_miles))]
    async fn search_nearby(
        &self,
        center: Coordinates,
        radius_miles: f64,
    ) -> Result<Vec<RestaurantSummary>, ProviderError> {
        let parsed: SearchResponse = self
            .get_json(
                "/food/restaurants/search",
                &[
                    ("lat", center.latitude().to_string()),
                    ("lng", center.longitude().to_string()),
                    ("distance", radius_miles.to_string()),
                ],
            )
            .await?;

        let summaries = parsed
            .restaurants
            .into_iter()
            .map(RestaurantSummary::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = summaries.len(), "nearby search complete");
        Ok(summaries)
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn restaurant_detail(
        &self,
        id: &ProviderRestaurantId,
    ) -> Result<RestaurantSummary, ProviderError> {
        let path = format!("/food/restaurants/{}", urlencoding::encode(id.as_str()));

        let parsed: DetailResponse = match self.get_json(&path, &[]).await {
            Ok(parsed) => parsed,
            Err(UpstreamError::Status(reqwest::StatusCode::NOT_FOUND)) => {
                return Err(ProviderError::NotFound(id.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(parsed.restaurant.try_into()?)
    }

    #[instrument(skip(self), fields(chain = %chain))]
    async fn menu_items(&self, chain: &ChainId) -> Result<Vec<MenuItemSummary>, ProviderError> {
        let parsed: MenuSearchResponse = self
            .get_json(
                "/food/menuItems/search",
                &[
                    ("query", chain.as_str().to_string()),
                    ("number", MENU_PAGE_SIZE.to_string()),
                ],
            )
            .await?;

        let total = parsed.menu_items.len();
        let items: Vec<MenuItemSummary> = parsed
            .menu_items
            .into_iter()
            .filter(|item| item.matches_chain(chain))
            .map(|item| item.into_summary(chain))
            .collect();

        debug!(
            matched = items.len(),
            discarded = total - items.len(),
            "menu catalog fetched"
        );
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn test_client_keeps_configured_base_url() {
        let config = SpoonacularConfig {
            base_url: "https://api.spoonacular.com".to_string(),
            api_key: SecretString::from("k"),
        };

        let client = SpoonacularClient::new(&config);

        assert_eq!(client.base_url, "https://api.spoonacular.com");
    }
}
