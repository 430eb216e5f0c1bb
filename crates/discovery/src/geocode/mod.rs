//! Zip-code geocoding.
//!
//! Turns a user-entered zip code into coordinates for nearby search. The zip
//! is validated locally before anything goes over the wire, so a malformed
//! zip never costs an API call.

mod positionstack;

pub use positionstack::PositionStackClient;

use std::future::Future;

use thiserror::Error;

use nearbite_core::{Coordinates, ZipCode, ZipCodeError};

use crate::error::UpstreamError;

/// Errors that can occur when geocoding a zip code.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The input failed zip validation; nothing was sent upstream.
    #[error("invalid zip code: {0}")]
    InvalidZip(#[from] ZipCodeError),

    /// The zip is well-formed but the geocoder has no match for it.
    #[error("no location found for zip {0}")]
    ZipNotFound(ZipCode),

    /// The geocoding service could not be reached or answered nonsense.
    #[error("geocoder unavailable: {0}")]
    Unavailable(#[from] UpstreamError),
}

/// Abstraction over the zip-to-coordinates service.
pub trait Geocoder {
    /// Resolve a raw zip string to coordinates.
    ///
    /// Takes the raw user input and performs validation itself, so callers
    /// get one error surface for "bad zip" and "unknown zip" alike.
    fn locate(&self, zip: &str) -> impl Future<Output = Result<Coordinates, GeocodeError>> + Send;
}
