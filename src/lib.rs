//! route-planner
//!
//! Lowest-cost visiting order for a handful of delivery stops, found by
//! scoring every possible order.

// Core: coordinates, tariff and exhaustive enumeration
pub mod coordinate;
pub mod cost;
pub mod error;
pub mod permutation;
pub mod solver;

// Host side: geocoding adapters and address-level planning
pub mod geocoder;
pub mod google;
pub mod nominatim;
pub mod planner;
pub mod traits;

pub use coordinate::{Coordinate, Stop};
pub use cost::{route_cost, segment_cost, CostModel, RouteMetrics, Segment};
pub use error::PlannerError;
pub use geocoder::{GeocoderBackend, GOOGLE_MAPS_API_KEY_ENV};
pub use planner::{plan, PlanRequest};
pub use solver::{enumerate_routes, PlannerResult, ResolvedStop, RouteResult, SolveOptions};
pub use traits::Geocoder;
