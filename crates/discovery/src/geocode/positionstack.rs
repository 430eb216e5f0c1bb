//! Positionstack forward-geocoding client implementation.
//!
//! One endpoint: `GET {base}/v1/forward?access_key=..&query=<zip>`. The
//! response carries a `data` array ordered by relevance; the first entry
//! wins. An empty array means the zip is well-formed but unknown.

use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{debug, instrument};

use nearbite_core::{Coordinates, ZipCode};

use crate::config::PositionStackConfig;
use crate::error::UpstreamError;

use super::{GeocodeError, Geocoder};

// =============================================================================
// Wire Types
// =============================================================================

/// Forward-geocoding response envelope.
#[derive(Debug, Deserialize)]
struct ForwardResponse {
    #[serde(default)]
    data: Vec<ForwardHit>,
}

/// One candidate location for the query.
#[derive(Debug, Deserialize)]
struct ForwardHit {
    latitude: f64,
    longitude: f64,
}

// =============================================================================
// PositionStackClient
// =============================================================================

/// Client for the Positionstack forward-geocoding API.
#[derive(Clone)]
pub struct PositionStackClient {
    client: reqwest::Client,
    endpoint: String,
    access_key: String,
}

impl PositionStackClient {
    /// Create a new geocoding client.
    #[must_use]
    pub fn new(config: &PositionStackConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/v1/forward", config.base_url),
            access_key: config.api_key.expose_secret().to_string(),
        }
    }
}

impl Geocoder for PositionStackClient {
    #[instrument(skip(self), fields(zip = %zip))]
    async fn locate(&self, zip: &str) -> Result<Coordinates, GeocodeError> {
        let zip = ZipCode::parse(zip)?;

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("access_key", self.access_key.as_str()),
                ("query", zip.as_str()),
            ])
            .send()
            .await
            // The query string carries the access key; strip the URL before
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
                body = %body.chars().take(500).collect::<String>(),
                "geocoder returned non-success status"
            );
            return Err(UpstreamError::Status(status).into());
        }

        let parsed: ForwardResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "failed to parse geocoder response"
            );
            UpstreamError::Parse(e)
        })?;

        let Some(hit) = parsed.data.first() else {
            debug!("geocoder has no match for zip");
            return Err(GeocodeError::ZipNotFound(zip));
        };

        let coordinates = Coordinates::new(hit.latitude, hit.longitude).map_err(|e| {
            UpstreamError::Payload(format!("geocoder returned unusable coordinates: {e}"))
        })?;

        debug!(%coordinates, "zip geocoded");
        Ok(coordinates)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forward_response() {
        let json = r#"{
            "data": [
                {
                    "latitude": 32.939385,
                    "longitude": -117.257837,
                    "label": "92130, San Diego, CA, USA",
                    "name": "92130",
                    "type": "postalcode",
                    "confidence": 1
                },
                {
                    "latitude": 33.0,
                    "longitude": -117.0,
                    "label": "somewhere less relevant"
                }
            ]
        }"#;

        let parsed: ForwardResponse = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.data.len(), 2);
        let first = parsed.data.first().unwrap();
        assert!((first.latitude - 32.939_385).abs() < f64::EPSILON);
        assert!((first.longitude - -117.257_837).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_forward_response_empty_data() {
        let parsed: ForwardResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_parse_forward_response_missing_data_key() {
        // Positionstack error payloads omit `data` entirely.
        let parsed: ForwardResponse =
            serde_json::from_str(r#"{"error": {"code": "invalid_access_key"}}"#).unwrap();
        assert!(parsed.data.is_empty());
    }

    #[test]
    fn test_client_builds_endpoint_from_config() {
        let config = PositionStackConfig {
            base_url: "http://api.positionstack.com".to_string(),
            api_key: secrecy::SecretString::from("k"),
        };

        let client = PositionStackClient::new(&config);

        assert_eq!(client.endpoint, "http://api.positionstack.com/v1/forward");
    }
}
