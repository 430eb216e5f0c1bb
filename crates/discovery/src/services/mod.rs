//! Business logic services for discovery.
//!
//! # Services
//!
//! - `discovery` - nearby search, detail lookup, lazy menu hydration, and
//!   the explicit refresh operations

pub mod discovery;

pub use discovery::DiscoveryService;
