//! Nearbite Discovery library.
//!
//! Everything between the upstream food APIs and the local relational store:
//! zip-code geocoding, nearby-restaurant search, menu hydration, and the
//! reconciliation that keeps provider data idempotently cached in `SQLite`.
//! The embedding application (web UI, auth, rendering) lives elsewhere and
//! talks to this crate through [`state::AppState`] and the services and
//! gateways it hands out.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod gateways;
pub mod geocode;
pub mod models;
pub mod provider;
pub mod reconcile;
pub mod services;
pub mod state;
