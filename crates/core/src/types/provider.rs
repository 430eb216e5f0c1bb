//! Identifiers assigned by the upstream food-data provider.
//!
//! These are distinct from the local row IDs in [`crate::types::id`]: the
//! provider mints them, we retain them verbatim, and they are the join keys
//! used to recognize records we have already seen. They are never synthesized
//! locally.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Provider-assigned identifier for a single restaurant location.
///
/// Opaque to us; the provider uses string keys (e.g. `"5faa0ec2d82a3"`), so
/// the value is stored exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderRestaurantId(String);

impl ProviderRestaurantId {
    /// Wrap a provider-assigned restaurant key.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProviderRestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProviderRestaurantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Provider-assigned identifier for a menu item.
///
/// The provider uses numeric keys for menu items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderItemId(i64);

impl ProviderItemId {
    /// Wrap a provider-assigned menu item key.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the underlying i64 value.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProviderItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProviderItemId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Identifier for a restaurant chain (brand), e.g. `"Domino's Pizza"`.
///
/// Menu catalogs are keyed per chain, not per location: every location of a
/// chain shares one menu. Derived from the provider's brand name, falling
/// back to the location name for independent restaurants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(String);

impl ChainId {
    /// Wrap a chain name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the chain name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChainId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

// SQLx support (with sqlite feature)
macro_rules! sqlite_string_newtype {
    ($name:ident) => {
        #[cfg(feature = "sqlite")]
        impl sqlx::Type<sqlx::Sqlite> for $name {
            fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
                <String as sqlx::Type<sqlx::Sqlite>>::type_info()
            }

            fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
            }
        }

        #[cfg(feature = "sqlite")]
        impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for $name {
            fn decode(
                value: sqlx::sqlite::SqliteValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <String as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
                Ok(Self(s))
            }
        }

        #[cfg(feature = "sqlite")]
        impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <String as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

sqlite_string_newtype!(ProviderRestaurantId);
sqlite_string_newtype!(ChainId);

#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for ProviderItemId {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <i64 as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <i64 as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for ProviderItemId {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let id = <i64 as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
        Ok(Self(id))
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for ProviderItemId {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <i64 as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_restaurant_id_verbatim() {
        let id = ProviderRestaurantId::new("5faa0ec2d82a3");
        assert_eq!(id.as_str(), "5faa0ec2d82a3");
        assert_eq!(format!("{id}"), "5faa0ec2d82a3");
    }

    #[test]
    fn test_restaurant_id_usable_as_set_key() {
        let mut seen = HashSet::new();
        assert!(seen.insert(ProviderRestaurantId::new("a")));
        assert!(!seen.insert(ProviderRestaurantId::new("a")));
        assert!(seen.insert(ProviderRestaurantId::new("b")));
    }

    #[test]
    fn test_item_id() {
        let id = ProviderItemId::new(424_571);
        assert_eq!(id.as_i64(), 424_571);
        assert_eq!(format!("{id}"), "424571");
    }

    #[test]
    fn test_chain_id_equality() {
        // Chain matching is exact, including case
        assert_eq!(ChainId::new("Domino's Pizza"), ChainId::new("Domino's Pizza"));
        assert_ne!(ChainId::new("Domino's Pizza"), ChainId::new("domino's pizza"));
    }

    #[test]
    fn test_serde_transparent() {
        let id = ProviderRestaurantId::new("abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");

        let item: ProviderItemId = serde_json::from_str("424571").unwrap();
        assert_eq!(item, ProviderItemId::new(424_571));
    }
}
