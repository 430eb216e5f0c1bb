//! Geographic coordinate pair.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing [`Coordinates`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CoordinatesError {
    /// A component is NaN or infinite.
    #[error("coordinates must be finite numbers")]
    NotFinite,
    /// Latitude is outside [-90, 90].
    #[error("latitude {0} is out of range (must be between -90 and 90)")]
    LatitudeOutOfRange(f64),
    /// Longitude is outside [-180, 180].
    #[error("longitude {0} is out of range (must be between -180 and 180)")]
    LongitudeOutOfRange(f64),
}

/// A latitude/longitude pair in decimal degrees (WGS 84).
///
/// ## Examples
///
/// ```
/// use nearbite_core::Coordinates;
///
/// let hollywood = Coordinates::new(34.0901, -118.4065)?;
/// assert_eq!(hollywood.latitude(), 34.0901);
///
/// // Out-of-range components are rejected
/// assert!(Coordinates::new(91.0, 0.0).is_err());
/// assert!(Coordinates::new(0.0, -200.0).is_err());
/// # Ok::<(), nearbite_core::CoordinatesError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Create a validated coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns an error if either component is NaN/infinite, or if latitude
    /// is outside [-90, 90] or longitude outside [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinatesError::NotFinite);
        }

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesError::LatitudeOutOfRange(latitude));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesError::LongitudeOutOfRange(longitude));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let coords = Coordinates::new(34.0901, -118.4065).unwrap();
        assert_eq!(coords.latitude(), 34.0901);
        assert_eq!(coords.longitude(), -118.4065);
    }

    #[test]
    fn test_new_extremes() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_latitude_out_of_range() {
        assert!(matches!(
            Coordinates::new(90.1, 0.0),
            Err(CoordinatesError::LatitudeOutOfRange(_))
        ));
        assert!(matches!(
            Coordinates::new(-90.1, 0.0),
            Err(CoordinatesError::LatitudeOutOfRange(_))
        ));
    }

    #[test]
    fn test_longitude_out_of_range() {
        assert!(matches!(
            Coordinates::new(0.0, 180.5),
            Err(CoordinatesError::LongitudeOutOfRange(_))
        ));
    }

    #[test]
    fn test_not_finite() {
        assert!(matches!(
            Coordinates::new(f64::NAN, 0.0),
            Err(CoordinatesError::NotFinite)
        ));
        assert!(matches!(
            Coordinates::new(0.0, f64::INFINITY),
            Err(CoordinatesError::NotFinite)
        ));
    }

    #[test]
    fn test_display() {
        let coords = Coordinates::new(34.5, -118.25).unwrap();
        assert_eq!(format!("{coords}"), "34.5,-118.25");
    }

    #[test]
    fn test_serde_roundtrip() {
        let coords = Coordinates::new(34.0901, -118.4065).unwrap();
        let json = serde_json::to_string(&coords).unwrap();
        let parsed: Coordinates = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, coords);
    }
}
