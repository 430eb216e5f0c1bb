//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nearbite_core::{Coordinates, UserId, ZipCode};

/// A registered user (domain type).
///
/// The password hash is deliberately absent: credential checks belong to the
/// embedding application, which fetches the hash through a dedicated
/// repository call.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address (uniqueness enforced by the store).
    pub email: String,
    /// Profile image.
    pub image_url: Option<String>,
    /// Saved home location, if the user set one.
    pub location: Option<UserLocation>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Full display name, `"First Last"`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A user's saved home location.
///
/// The zip and the coordinates it geocoded to always travel together; there
/// is no state where one is set without the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLocation {
    /// The zip code the user entered.
    pub zip: ZipCode,
    /// Where geocoding placed that zip.
    pub coordinates: Coordinates,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let user = User {
            id: UserId::new(1),
            first_name: "Avery".to_string(),
            last_name: "Chen".to_string(),
            email: "avery@example.com".to_string(),
            image_url: None,
            location: None,
            created_at: Utc::now(),
        };
        assert_eq!(user.full_name(), "Avery Chen");
    }
}
