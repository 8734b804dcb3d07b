//! Address-level entry point shared by every host.
//!
//! Resolves addresses through a [`Geocoder`] and hands the resulting stops to
//! [`enumerate_routes`]. Hosts only differ in how they collect addresses and
//! render the [`PlannerResult`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::coordinate::{Coordinate, Stop};
use crate::error::PlannerError;
use crate::solver::{enumerate_routes, PlannerResult, SolveOptions};
use crate::traits::Geocoder;

/// The first address is the origin; the rest are deliveries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub addresses: Vec<String>,
    #[serde(default = "default_return_to_start")]
    pub return_to_start: bool,
}

fn default_return_to_start() -> bool {
    true
}

/// Geocode every address in `request`, then enumerate routes over them.
///
/// Repeated addresses are looked up once. An address the geocoder cannot
/// resolve fails the whole request.
pub fn plan<G: Geocoder>(
    request: &PlanRequest,
    geocoder: &G,
    options: &SolveOptions,
) -> Result<PlannerResult, PlannerError> {
    let Some((origin, deliveries)) = request.addresses.split_first() else {
        return Err(PlannerError::TooFewStops);
    };
    if deliveries.is_empty() {
        return Err(PlannerError::TooFewStops);
    }

    // Reject bad requests before spending any lookups on them
    options.cost_model.validate()?;

    let count = request.addresses.len();
    if count > options.max_stops {
        return Err(PlannerError::TooManyStops {
            count,
            max: options.max_stops,
        });
    }

    info!("Geocoding {} addresses", count);
    let mut cache: HashMap<&str, Coordinate> = HashMap::new();

    let origin = resolve_stop(origin, geocoder, &mut cache)?;
    let deliveries = deliveries
        .iter()
        .map(|address| resolve_stop(address, geocoder, &mut cache))
        .collect::<Result<Vec<_>, _>>()?;

    enumerate_routes(&origin, &deliveries, request.return_to_start, options)
}

fn resolve_stop<'a, G: Geocoder>(
    address: &'a str,
    geocoder: &G,
    cache: &mut HashMap<&'a str, Coordinate>,
) -> Result<Stop, PlannerError> {
    if let Some(coordinate) = cache.get(address) {
        return Ok(Stop::new(address, *coordinate));
    }

    match geocoder.geocode(address)? {
        Some(coordinate) => {
            cache.insert(address, coordinate);
            Ok(Stop::new(address, coordinate))
        }
        None => {
            warn!(address = %address, "address could not be resolved");
            Err(PlannerError::UnresolvedAddress {
                address: address.to_string(),
            })
        }
    }
}
