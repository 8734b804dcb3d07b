//! Test fixtures for route-planner.
//!
//! Provides realistic test data including:
//! - Real Lisbon locations (from OpenStreetMap)
//! - A map-backed geocoder for address-level tests
//! - A local HTTP stub for the geocoder adapters

pub mod http_stub;
pub mod lisbon_locations;

pub use http_stub::*;
pub use lisbon_locations::*;
