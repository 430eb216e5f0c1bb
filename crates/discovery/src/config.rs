//! Discovery configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `NEARBITE_DATABASE_URL` - `SQLite` connection string (e.g., `sqlite://nearbite.db`)
//! - `POSITIONSTACK_API_KEY` - Positionstack geocoding API access key
//! - `SPOONACULAR_API_KEY` - Spoonacular food API key
//!
//! ## Optional
//! - `NEARBITE_SEARCH_RADIUS_MILES` - Nearby-search radius (default: 5)
//! - `POSITIONSTACK_BASE_URL` - Override the geocoding endpoint (default: `http://api.positionstack.com`)
//! - `SPOONACULAR_BASE_URL` - Override the food API endpoint (default: `https://api.spoonacular.com`)

use secrecy::SecretString;
use thiserror::Error;

/// Default search radius around a geocoded location, in miles.
const DEFAULT_SEARCH_RADIUS_MILES: &str = "5";

/// Positionstack free-plan keys are rejected over https, so the default stays
/// on plain http. Paid plans can override via `POSITIONSTACK_BASE_URL`.
const DEFAULT_POSITIONSTACK_BASE_URL: &str = "http://api.positionstack.com";

const DEFAULT_SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Discovery subsystem configuration.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// `SQLite` database connection URL
    pub database_url: SecretString,
    /// Radius for nearby-restaurant searches, in miles
    pub search_radius_miles: f64,
    /// Positionstack geocoding API configuration
    pub geocoder: PositionStackConfig,
    /// Spoonacular food API configuration
    pub provider: SpoonacularConfig,
}

/// Positionstack geocoding API configuration.
///
/// Implements `Debug` manually to redact the access key.
#[derive(Clone)]
pub struct PositionStackConfig {
    /// Base URL of the API (no trailing slash)
    pub base_url: String,
    /// API access key
    pub api_key: SecretString,
}

impl std::fmt::Debug for PositionStackConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PositionStackConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Spoonacular food API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct SpoonacularConfig {
    /// Base URL of the API (no trailing slash)
    pub base_url: String,
    /// API key
    pub api_key: SecretString,
}

impl std::fmt::Debug for SpoonacularConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpoonacularConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl DiscoveryConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, base URLs or
    /// the search radius fail to parse, or an API key looks like a
    /// placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("NEARBITE_DATABASE_URL")?;
        let search_radius_miles = parse_radius(
            "NEARBITE_SEARCH_RADIUS_MILES",
            &get_env_or_default("NEARBITE_SEARCH_RADIUS_MILES", DEFAULT_SEARCH_RADIUS_MILES),
        )?;

        let geocoder = PositionStackConfig::from_env()?;
        let provider = SpoonacularConfig::from_env()?;

        Ok(Self {
            database_url,
            search_radius_miles,
            geocoder,
            provider,
        })
    }
}

impl PositionStackConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: validate_base_url(
                "POSITIONSTACK_BASE_URL",
                get_env_or_default("POSITIONSTACK_BASE_URL", DEFAULT_POSITIONSTACK_BASE_URL),
            )?,
            api_key: get_checked_secret("POSITIONSTACK_API_KEY")?,
        })
    }
}

impl SpoonacularConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: validate_base_url(
                "SPOONACULAR_BASE_URL",
                get_env_or_default("SPOONACULAR_BASE_URL", DEFAULT_SPOONACULAR_BASE_URL),
            )?,
            api_key: get_checked_secret("SPOONACULAR_API_KEY")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get database URL with fallback to generic `DATABASE_URL` (what `sqlx-cli`
/// and most hosting providers set).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Validate that a value is an absolute URL, trimming any trailing slash.
fn validate_base_url(var_name: &str, value: String) -> Result<String, ConfigError> {
    url::Url::parse(&value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    Ok(value.trim_end_matches('/').to_string())
}

/// Parse a search radius, rejecting non-positive and non-finite values.
fn parse_radius(var_name: &str, value: &str) -> Result<f64, ConfigError> {
    let radius = value
        .parse::<f64>()
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !radius.is_finite() || radius <= 0.0 {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("radius must be a positive number of miles (got {value})"),
        ));
    }

    Ok(radius)
}

/// Validate that a secret is not an obvious placeholder.
fn validate_secret_not_placeholder(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

/// Load a secret from environment, rejecting placeholder values.
fn get_checked_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_not_placeholder(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url_accepts_http() {
        let url = validate_base_url("TEST_VAR", "http://api.positionstack.com".to_string());
        assert_eq!(url.unwrap(), "http://api.positionstack.com");
    }

    #[test]
    fn test_validate_base_url_trims_trailing_slash() {
        let url = validate_base_url("TEST_VAR", "https://api.spoonacular.com/".to_string());
        assert_eq!(url.unwrap(), "https://api.spoonacular.com");
    }

    #[test]
    fn test_validate_base_url_rejects_garbage() {
        let result = validate_base_url("TEST_VAR", "not a url".to_string());
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_parse_radius_default() {
        let radius = parse_radius("TEST_VAR", DEFAULT_SEARCH_RADIUS_MILES).unwrap();
        assert!((radius - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_radius_fractional() {
        let radius = parse_radius("TEST_VAR", "2.5").unwrap();
        assert!((radius - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_radius_rejects_non_numeric() {
        assert!(matches!(
            parse_radius("TEST_VAR", "five"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_parse_radius_rejects_non_positive() {
        assert!(parse_radius("TEST_VAR", "0").is_err());
        assert!(parse_radius("TEST_VAR", "-3").is_err());
        assert!(parse_radius("TEST_VAR", "inf").is_err());
    }

    #[test]
    fn test_validate_secret_placeholder() {
        let result = validate_secret_not_placeholder("your-api-key-here", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_changeme() {
        assert!(validate_secret_not_placeholder("changeme123", "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_secret_real_looking_key() {
        let result = validate_secret_not_placeholder("8f2c1a9d4e7b03651f8a2c4d9e0b7a31", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_geocoder_config_debug_redacts_key() {
        let config = PositionStackConfig {
            base_url: "http://api.positionstack.com".to_string(),
            api_key: SecretString::from("super_secret_access_key"),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("api.positionstack.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_access_key"));
    }

    #[test]
    fn test_provider_config_debug_redacts_key() {
        let config = SpoonacularConfig {
            base_url: "https://api.spoonacular.com".to_string(),
            api_key: SecretString::from("super_secret_api_key"),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("api.spoonacular.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_api_key"));
    }
}
