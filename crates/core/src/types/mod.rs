//! Core types for Nearbite.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod coords;
pub mod id;
pub mod provider;
pub mod zip;

pub use coords::{Coordinates, CoordinatesError};
pub use id::*;
pub use provider::{ChainId, ProviderItemId, ProviderRestaurantId};
pub use zip::{ZipCode, ZipCodeError};
