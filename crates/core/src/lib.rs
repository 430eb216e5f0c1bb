//! Nearbite Core - Shared types library.
//!
//! This crate provides common types used across all Nearbite components:
//! - `discovery` - Restaurant discovery and local-store synchronization
//! - `cli` - Command-line tools for migrations, seeding, and lookups
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, zip codes, coordinates,
//!   and provider-assigned identifiers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
