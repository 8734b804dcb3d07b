//! Failure reasons surfaced to the caller.
//!
//! Display strings are meant to be shown to end users as-is.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error("Please provide at least one delivery address")]
    TooFewStops,

    #[error("Maximum {max} addresses supported for performance reasons (got {count})")]
    TooManyStops { count: usize, max: usize },

    #[error("Could not geocode address: {address}")]
    UnresolvedAddress { address: String },

    #[error("Invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    #[error("Invalid cost model: {0}")]
    InvalidCostModel(String),

    #[error("Geocoding request failed: {0}")]
    Geocoding(String),
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        Self::Geocoding(err.to_string())
    }
}
