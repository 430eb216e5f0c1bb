//! Integration test support for Nearbite.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nearbite-integration-tests
//! ```
//!
//! Every test gets its own tempfile-backed `SQLite` database with migrations
//! applied, plus in-memory fakes for the two upstream APIs, so the suite
//! needs no network and no pre-provisioned services.
//!
//! # Test Categories
//!
//! - `discovery_flow` - Zip-to-results flows across geocoder, provider, store
//! - `reconcile` - Identity-key reconciliation and explicit refresh
//! - `menu_hydration` - Lazy per-chain menu fetching
//! - `favorites` - Toggle semantics and listings
//! - `reviews` - Author-gated review lifecycle
//! - `users` - Accounts and saved locations

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use secrecy::SecretString;
use sqlx::SqlitePool;
use tempfile::TempDir;

use nearbite_core::{ChainId, Coordinates, ProviderItemId, ProviderRestaurantId, ZipCode};
use nearbite_discovery::db::{self, UserRepository};
use nearbite_discovery::error::UpstreamError;
use nearbite_discovery::geocode::{GeocodeError, Geocoder};
use nearbite_discovery::models::{User, WeeklyHours};
use nearbite_discovery::provider::{
    FoodDataProvider, MenuItemSummary, ProviderError, RestaurantSummary,
};

// =============================================================================
// Test Context
// =============================================================================

/// A fresh database for one test.
///
/// The temp directory is dropped with the context, deleting the database
/// file.
pub struct TestContext {
    pub pool: SqlitePool,
    _dir: TempDir,
}

impl TestContext {
    /// Open a tempfile-backed database with migrations applied.
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be created or migrated; no test can run
    /// without it.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("nearbite-test.db");
        let url = SecretString::from(format!("sqlite://{}", path.display()));

        let pool = db::create_pool(&url).await.expect("open test database");
        db::MIGRATOR.run(&pool).await.expect("apply migrations");

        Self { pool, _dir: dir }
    }

    /// Insert a user with the given email and return it.
    ///
    /// # Panics
    ///
    /// Panics if the insert fails (e.g. duplicate email).
    pub async fn create_user(&self, email: &str) -> User {
        UserRepository::new(&self.pool)
            .create("Test", "User", email, "test-password-hash", None)
            .await
            .expect("create test user")
    }
}

// =============================================================================
// Fake Upstreams
// =============================================================================

/// Geocoder fake backed by a fixed zip-to-coordinates table.
#[derive(Default)]
pub struct FakeGeocoder {
    results: HashMap<String, Coordinates>,
    calls: AtomicUsize,
}

impl FakeGeocoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zip this fake will resolve.
    ///
    /// # Panics
    ///
    /// Panics if `lat`/`lon` are out of range.
    #[must_use]
    pub fn with(mut self, zip: &str, lat: f64, lon: f64) -> Self {
        let coords = Coordinates::new(lat, lon).expect("valid test coordinates");
        self.results.insert(zip.to_owned(), coords);
        self
    }

    /// How many times `locate` has been called.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for FakeGeocoder {
    async fn locate(&self, zip: &str) -> Result<Coordinates, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let zip = ZipCode::parse(zip)?;
        self.results
            .get(zip.as_str())
            .copied()
            .ok_or(GeocodeError::ZipNotFound(zip))
    }
}

/// Provider fake backed by in-memory tables, with per-operation call
/// counters and a switchable outage mode.
#[derive(Default)]
pub struct FakeProvider {
    nearby: Mutex<Vec<RestaurantSummary>>,
    details: Mutex<HashMap<ProviderRestaurantId, RestaurantSummary>>,
    menus: Mutex<HashMap<ChainId, Vec<MenuItemSummary>>>,
    failing: AtomicBool,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    menu_calls: AtomicUsize,
}

impl FakeProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set what `search_nearby` returns.
    ///
    /// # Panics
    ///
    /// Panics if another holder of the fake panicked mid-update.
    pub fn set_nearby(&self, summaries: Vec<RestaurantSummary>) {
        *self.nearby.lock().expect("lock poisoned") = summaries;
    }

    /// Register a detail-lookup result under its provider id.
    ///
    /// # Panics
    ///
    /// Panics if another holder of the fake panicked mid-update.
    pub fn set_detail(&self, summary: RestaurantSummary) {
        self.details
            .lock()
            .expect("lock poisoned")
            .insert(summary.provider_id.clone(), summary);
    }

    /// Set a chain's menu catalog.
    ///
    /// # Panics
    ///
    /// Panics if another holder of the fake panicked mid-update.
    pub fn set_menu(&self, chain: &ChainId, items: Vec<MenuItemSummary>) {
        self.menus
            .lock()
            .expect("lock poisoned")
            .insert(chain.clone(), items);
    }

    /// Make every call fail with an upstream error until cleared.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// How many times `search_nearby` has been called.
    #[must_use]
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// How many times `restaurant_detail` has been called.
    #[must_use]
    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    /// How many times `menu_items` has been called.
    #[must_use]
    pub fn menu_calls(&self) -> usize {
        self.menu_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), ProviderError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ProviderError::Unavailable(UpstreamError::Payload(
                "simulated outage".to_owned(),
            )));
        }
        Ok(())
    }
}

impl FoodDataProvider for FakeProvider {
    async fn search_nearby(
        &self,
        _center: Coordinates,
        _radius_miles: f64,
    ) -> Result<Vec<RestaurantSummary>, ProviderError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self.nearby.lock().expect("lock poisoned").clone())
    }

    async fn restaurant_detail(
        &self,
        id: &ProviderRestaurantId,
    ) -> Result<RestaurantSummary, ProviderError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.details
            .lock()
            .expect("lock poisoned")
            .get(id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(id.clone()))
    }

    async fn menu_items(&self, chain: &ChainId) -> Result<Vec<MenuItemSummary>, ProviderError> {
        self.menu_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self
            .menus
            .lock()
            .expect("lock poisoned")
            .get(chain)
            .cloned()
            .unwrap_or_default())
    }
}

// =============================================================================
// Sample Data Builders
// =============================================================================

/// A restaurant summary with plausible defaults; override what matters.
#[must_use]
pub fn restaurant_summary(provider_id: &str, chain: &str, name: &str) -> RestaurantSummary {
    RestaurantSummary {
        provider_id: ProviderRestaurantId::new(provider_id),
        chain: ChainId::new(chain),
        name: name.to_owned(),
        address: Some("123 Main St, San Diego, CA, 92101".to_owned()),
        cuisines: Some("American".to_owned()),
        description: None,
        phone: Some("(619)-555-0100".to_owned()),
        photo_url: None,
        coordinates: Coordinates::new(32.7157, -117.1611).ok(),
        hours: WeeklyHours::default(),
    }
}

/// A menu item summary with plausible defaults.
#[must_use]
pub fn menu_item_summary(provider_id: i64, chain: &str, title: &str) -> MenuItemSummary {
    MenuItemSummary {
        provider_id: ProviderItemId::new(provider_id),
        chain: ChainId::new(chain),
        title: title.to_owned(),
        image_url: None,
    }
}
