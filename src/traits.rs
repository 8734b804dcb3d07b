//! Collaborator interfaces for the route planner.
//!
//! The enumerator itself performs no I/O. Hosts plug address resolution in
//! through these traits.

use crate::coordinate::Coordinate;
use crate::error::PlannerError;

/// Resolves a human-readable address to a coordinate.
///
/// `Ok(None)` means the service answered but found nothing; `Err` means the
/// lookup itself failed.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, PlannerError>;
}
