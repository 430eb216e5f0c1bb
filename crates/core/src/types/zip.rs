//! US postal zip code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ZipCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ZipCodeError {
    /// The input string is empty.
    #[error("zip code cannot be empty")]
    Empty,
    /// The input is not exactly five characters long.
    #[error("zip code must be exactly {expected} digits (got {len})")]
    WrongLength {
        /// Required number of digits.
        expected: usize,
        /// Length of the rejected input.
        len: usize,
    },
    /// The input contains a character that is not an ASCII digit.
    #[error("zip code must contain only digits (found {found:?})")]
    InvalidCharacter {
        /// First offending character.
        found: char,
    },
}

/// A five-digit US postal zip code.
///
/// Leading zeros are significant ("02134" and "2134" are not the same thing),
/// so the code is kept as a string rather than a number.
///
/// ## Constraints
///
/// - Exactly 5 characters
/// - ASCII digits only
///
/// ## Examples
///
/// ```
/// use nearbite_core::ZipCode;
///
/// // Valid zip codes
/// assert!(ZipCode::parse("90210").is_ok());
/// assert!(ZipCode::parse("02134").is_ok());
///
/// // Invalid zip codes
/// assert!(ZipCode::parse("").is_err());      // empty
/// assert!(ZipCode::parse("9021").is_err());  // too short
/// assert!(ZipCode::parse("9021O").is_err()); // letter O, not zero
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ZipCode(String);

impl ZipCode {
    /// Number of digits in a zip code.
    pub const LENGTH: usize = 5;

    /// Parse a `ZipCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is not exactly 5 characters long
    /// - Contains anything other than ASCII digits
    pub fn parse(s: &str) -> Result<Self, ZipCodeError> {
        if s.is_empty() {
            return Err(ZipCodeError::Empty);
        }

        if s.len() != Self::LENGTH {
            return Err(ZipCodeError::WrongLength {
                expected: Self::LENGTH,
                len: s.len(),
            });
        }

        if let Some(found) = s.chars().find(|c| !c.is_ascii_digit()) {
            return Err(ZipCodeError::InvalidCharacter { found });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the zip code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ZipCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ZipCode {
    type Err = ZipCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ZipCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with sqlite feature)
#[cfg(feature = "sqlite")]
impl sqlx::Type<sqlx::Sqlite> for ZipCode {
    fn type_info() -> sqlx::sqlite::SqliteTypeInfo {
        <String as sqlx::Type<sqlx::Sqlite>>::type_info()
    }

    fn compatible(ty: &sqlx::sqlite::SqliteTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Sqlite>>::compatible(ty)
    }
}

#[cfg(feature = "sqlite")]
impl<'r> sqlx::Decode<'r, sqlx::Sqlite> for ZipCode {
    fn decode(value: sqlx::sqlite::SqliteValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<'r, sqlx::Sqlite>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "sqlite")]
impl<'q> sqlx::Encode<'q, sqlx::Sqlite> for ZipCode {
    fn encode_by_ref(
        &self,
        buf: &mut Vec<sqlx::sqlite::SqliteArgumentValue<'q>>,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<'q, sqlx::Sqlite>>::encode_by_ref(&self.0, buf)
    }
}
