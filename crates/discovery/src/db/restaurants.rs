//! Restaurant repository for database operations.
//!
//! Restaurants are cache rows sourced from the provider: inserted on first
//! sight, overwritten only by an explicit refresh, and never deleted by sync.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use nearbite_core::{ChainId, Coordinates, ProviderRestaurantId, RestaurantId};

use super::RepositoryError;
use crate::models::restaurant::{Restaurant, WeeklyHours};
use crate::provider::RestaurantSummary;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for restaurant queries.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct RestaurantRow {
    id: i64,
    provider_id: String,
    chain: String,
    name: String,
    address: Option<String>,
    cuisines: Option<String>,
    description: Option<String>,
    phone: Option<String>,
    photo_url: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    sunday_hours: Option<String>,
    monday_hours: Option<String>,
    tuesday_hours: Option<String>,
    wednesday_hours: Option<String>,
    thursday_hours: Option<String>,
    friday_hours: Option<String>,
    saturday_hours: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<RestaurantRow> for Restaurant {
    type Error = RepositoryError;

    fn try_from(row: RestaurantRow) -> Result<Self, Self::Error> {
        let coordinates = match (row.latitude, row.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon).map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid coordinates in database: {e}"))
            })?),
            (None, None) => None,
            _ => {
                return Err(RepositoryError::DataCorruption(
                    "latitude and longitude must be set together".to_owned(),
                ));
            }
        };

        Ok(Self {
            id: RestaurantId::new(row.id),
            provider_id: ProviderRestaurantId::new(row.provider_id),
            chain: ChainId::new(row.chain),
            name: row.name,
            address: row.address,
            cuisines: row.cuisines,
            description: row.description,
            phone: row.phone,
            photo_url: row.photo_url,
            coordinates,
            hours: WeeklyHours {
                sunday: row.sunday_hours,
                monday: row.monday_hours,
                tuesday: row.tuesday_hours,
                wednesday: row.wednesday_hours,
                thursday: row.thursday_hours,
                friday: row.friday_hours,
                saturday: row.saturday_hours,
            },
            created_at: row.created_at,
        })
    }
}

/// Column list shared by every query that materializes a [`RestaurantRow`].
const RESTAURANT_COLUMNS: &str = "id, provider_id, chain, name, address, cuisines, description, \
     phone, photo_url, latitude, longitude, sunday_hours, monday_hours, tuesday_hours, \
     wednesday_hours, thursday_hours, friday_hours, saturday_hours, created_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for restaurant database operations.
pub struct RestaurantRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> RestaurantRepository<'a> {
    /// Create a new restaurant repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a restaurant by its local row ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored data is invalid.
    pub async fn get(&self, id: RestaurantId) -> Result<Option<Restaurant>, RepositoryError> {
        let row = sqlx::query_as::<_, RestaurantRow>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a restaurant by the provider's permanent key.
    ///
    /// This is the lookup reconciliation uses to recognize records it has
    /// already cached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored data is invalid.
    pub async fn find_by_provider_id(
        &self,
        provider_id: &ProviderRestaurantId,
    ) -> Result<Option<Restaurant>, RepositoryError> {
        let row = sqlx::query_as::<_, RestaurantRow>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM restaurants WHERE provider_id = ?1"
        ))
        .bind(provider_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Insert a provider summary as a new cached restaurant.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the provider id is already
    /// cached (another writer got there first).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(
        &self,
        summary: &RestaurantSummary,
    ) -> Result<Restaurant, RepositoryError> {
        let row = sqlx::query_as::<_, RestaurantRow>(&format!(
            "INSERT INTO restaurants (provider_id, chain, name, address, cuisines, description, \
             phone, photo_url, latitude, longitude, sunday_hours, monday_hours, tuesday_hours, \
             wednesday_hours, thursday_hours, friday_hours, saturday_hours, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
             RETURNING {RESTAURANT_COLUMNS}"
        ))
        .bind(&summary.provider_id)
        .bind(&summary.chain)
        .bind(&summary.name)
        .bind(summary.address.as_deref())
        .bind(summary.cuisines.as_deref())
        .bind(summary.description.as_deref())
        .bind(summary.phone.as_deref())
        .bind(summary.photo_url.as_deref())
        .bind(summary.coordinates.map(|c| c.latitude()))
        .bind(summary.coordinates.map(|c| c.longitude()))
        .bind(summary.hours.sunday.as_deref())
        .bind(summary.hours.monday.as_deref())
        .bind(summary.hours.tuesday.as_deref())
        .bind(summary.hours.wednesday.as_deref())
        .bind(summary.hours.thursday.as_deref())
        .bind(summary.hours.friday.as_deref())
        .bind(summary.hours.saturday.as_deref())
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(format!(
                    "restaurant {} already cached",
                    summary.provider_id
                ));
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Overwrite a cached restaurant with fresh provider data.
    ///
    /// Every descriptive field is replaced; the local id and the original
    /// `created_at` are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the provider id is not cached.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_from_summary(
        &self,
        summary: &RestaurantSummary,
    ) -> Result<Restaurant, RepositoryError> {
        let row = sqlx::query_as::<_, RestaurantRow>(&format!(
            "UPDATE restaurants
             SET chain = ?2, name = ?3, address = ?4, cuisines = ?5, description = ?6,
                 phone = ?7, photo_url = ?8, latitude = ?9, longitude = ?10,
                 sunday_hours = ?11, monday_hours = ?12, tuesday_hours = ?13,
                 wednesday_hours = ?14, thursday_hours = ?15, friday_hours = ?16,
                 saturday_hours = ?17
             WHERE provider_id = ?1
             RETURNING {RESTAURANT_COLUMNS}"
        ))
        .bind(&summary.provider_id)
        .bind(&summary.chain)
        .bind(&summary.name)
        .bind(summary.address.as_deref())
        .bind(summary.cuisines.as_deref())
        .bind(summary.description.as_deref())
        .bind(summary.phone.as_deref())
        .bind(summary.photo_url.as_deref())
        .bind(summary.coordinates.map(|c| c.latitude()))
        .bind(summary.coordinates.map(|c| c.longitude()))
        .bind(summary.hours.sunday.as_deref())
        .bind(summary.hours.monday.as_deref())
        .bind(summary.hours.tuesday.as_deref())
        .bind(summary.hours.wednesday.as_deref())
        .bind(summary.hours.thursday.as_deref())
        .bind(summary.hours.friday.as_deref())
        .bind(summary.hours.saturday.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Count cached restaurants.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM restaurants")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
