//! Menu item repository and per-chain fetch state.
//!
//! Two repositories live here because they change together: menu items are
//! only ever written as part of hydrating a chain's catalog, and
//! `chain_menu_state` is what records that the hydration happened.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use nearbite_core::{ChainId, MenuItemId, ProviderItemId};

use super::RepositoryError;
use crate::models::menu_item::{MenuFetchStatus, MenuItem};
use crate::provider::MenuItemSummary;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for menu item queries.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct MenuItemRow {
    id: i64,
    provider_id: i64,
    chain: String,
    title: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        Self {
            id: MenuItemId::new(row.id),
            provider_id: ProviderItemId::new(row.provider_id),
            chain: ChainId::new(row.chain),
            title: row.title,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

const MENU_ITEM_COLUMNS: &str = "id, provider_id, chain, title, image_url, created_at";

// =============================================================================
// Menu Item Repository
// =============================================================================

/// Repository for menu item database operations.
pub struct MenuItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MenuItemRepository<'a> {
    /// Create a new menu item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a menu item by its local row ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: MenuItemId) -> Result<Option<MenuItem>, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Get a menu item by the provider's numeric key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_provider_id(
        &self,
        provider_id: ProviderItemId,
    ) -> Result<Option<MenuItem>, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE provider_id = ?1"
        ))
        .bind(provider_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List a chain's cached catalog.
    ///
    /// Ordered by local id ascending, which is the order items were first
    /// reconciled in - i.e. the provider's original catalog order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_chain(&self, chain: &ChainId) -> Result<Vec<MenuItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, MenuItemRow>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE chain = ?1 ORDER BY id ASC"
        ))
        .bind(chain)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Insert a provider summary as a new cached menu item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the provider id is already
    /// cached (another writer got there first).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn insert(&self, summary: &MenuItemSummary) -> Result<MenuItem, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "INSERT INTO menu_items (provider_id, chain, title, image_url, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING {MENU_ITEM_COLUMNS}"
        ))
        .bind(summary.provider_id)
        .bind(&summary.chain)
        .bind(&summary.title)
        .bind(summary.image_url.as_deref())
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict(format!(
                    "menu item {} already cached",
                    summary.provider_id
                ));
            }
            RepositoryError::Database(e)
        })?;

        Ok(row.into())
    }

    /// Overwrite a cached menu item with fresh provider data.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the provider id is not cached.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_from_summary(
        &self,
        summary: &MenuItemSummary,
    ) -> Result<MenuItem, RepositoryError> {
        let row = sqlx::query_as::<_, MenuItemRow>(&format!(
            "UPDATE menu_items
             SET chain = ?2, title = ?3, image_url = ?4
             WHERE provider_id = ?1
             RETURNING {MENU_ITEM_COLUMNS}"
        ))
        .bind(summary.provider_id)
        .bind(&summary.chain)
        .bind(&summary.title)
        .bind(summary.image_url.as_deref())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Count cached menu items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu_items")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Chain Menu State Repository
// =============================================================================

/// Repository for per-chain menu fetch state.
pub struct ChainMenuStateRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ChainMenuStateRepository<'a> {
    /// Create a new chain menu state repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Whether this chain's catalog has ever been fetched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn fetch_status(&self, chain: &ChainId) -> Result<MenuFetchStatus, RepositoryError> {
        let fetched_at = sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT fetched_at FROM chain_menu_state WHERE chain = ?1",
        )
        .bind(chain)
        .fetch_optional(self.pool)
        .await?;

        Ok(fetched_at.map_or(MenuFetchStatus::NotFetched, |at| MenuFetchStatus::Fetched {
            at,
        }))
    }

    /// Record that this chain's catalog was fetched.
    ///
    /// Upserts: re-fetching just moves the timestamp forward.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn mark_fetched(
        &self,
        chain: &ChainId,
        at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO chain_menu_state (chain, fetched_at)
             VALUES (?1, ?2)
             ON CONFLICT (chain) DO UPDATE SET fetched_at = excluded.fetched_at",
        )
        .bind(chain)
        .bind(at)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
