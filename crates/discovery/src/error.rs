//! Unified error handling for discovery operations.
//!
//! Each module defines its own error enum; [`DiscoveryError`] is the
//! aggregate the CLI and embedding applications work with. All variants are
//! transparent wrappers, so `?` does the lifting.

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::gateways::GatewayError;
use crate::geocode::GeocodeError;
use crate::provider::ProviderError;

/// A failed conversation with an upstream HTTP API.
///
/// Wrapped by `GeocodeError::Unavailable` and `ProviderError::Unavailable`.
/// Callers are expected to treat every variant the same way (surface the
/// outage, try again later); the split exists for logs.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The request never completed (connect failure, timeout, etc.).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream answered with a non-success status code.
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not the JSON shape we expect.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response parsed, but carried values we refuse to accept.
    #[error("invalid payload: {0}")]
    Payload(String),
}

/// Application-level error type for the discovery subsystem.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Schema migrations failed to apply.
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Zip-code geocoding failed.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// The food-data provider call failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Local store operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Favorites/reviews gateway rejected the operation.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Result type alias for `DiscoveryError`.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
