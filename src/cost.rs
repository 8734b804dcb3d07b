//! Distance, time, and monetary cost of a route.
//!
//! Distance is the straight-line geodesic distance on the WGS84 ellipsoid.
//! Time is a flat-speed estimate plus a fixed handling overhead per leg. This
//! ignores the road network entirely; it is a deliberate simplification and
//! it alone decides which visiting order is judged cheapest.

use geo::{Distance, Geodesic};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::PlannerError;

/// Average urban driving speed.
pub const DEFAULT_SPEED_KMH: f64 = 50.0;

/// Handling overhead added to every leg.
pub const DEFAULT_PER_STOP_MINUTES: f64 = 5.0;

/// Tariff per kilometer driven.
pub const DEFAULT_COST_PER_KM: f64 = 0.50;

/// Tariff per minute spent.
pub const DEFAULT_COST_PER_MINUTE: f64 = 0.20;

const KM_TO_MILES: f64 = 0.621371;

/// Linear tariff and flat-speed time model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Assumed average speed in km/h.
    pub speed_kmh: f64,
    /// Fixed minutes added per leg.
    pub per_stop_minutes: f64,
    /// Monetary units per kilometer.
    pub cost_per_km: f64,
    /// Monetary units per minute.
    pub cost_per_minute: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            per_stop_minutes: DEFAULT_PER_STOP_MINUTES,
            cost_per_km: DEFAULT_COST_PER_KM,
            cost_per_minute: DEFAULT_COST_PER_MINUTE,
        }
    }
}

/// Unrounded distance and time of a single leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub distance_km: f64,
    pub time_minutes: f64,
}

impl Segment {
    /// Sentinel for a leg that cannot be driven.
    pub const IMPOSSIBLE: Segment = Segment {
        distance_km: f64::INFINITY,
        time_minutes: f64::INFINITY,
    };
}

/// Rounded totals for a whole route. Computed once, never updated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    /// Kilometers, two decimals.
    pub distance_km: f64,
    /// Whole minutes.
    pub time_minutes: u32,
    /// Currency units, two decimals.
    pub cost: f64,
}

impl RouteMetrics {
    pub const ZERO: RouteMetrics = RouteMetrics {
        distance_km: 0.0,
        time_minutes: 0,
        cost: 0.0,
    };

    pub fn distance_miles(&self) -> f64 {
        round_2dp(self.distance_km * KM_TO_MILES)
    }
}

impl CostModel {
    /// Rejects tariffs that would produce non-finite or negative costs.
    pub fn validate(&self) -> Result<(), PlannerError> {
        let invalid = |reason: &str| Err(PlannerError::InvalidCostModel(reason.to_string()));

        if !(self.speed_kmh.is_finite() && self.speed_kmh > 0.0) {
            return invalid("speed_kmh must be finite and positive");
        }
        if !(self.per_stop_minutes.is_finite() && self.per_stop_minutes >= 0.0) {
            return invalid("per_stop_minutes must be finite and non-negative");
        }
        if !(self.cost_per_km.is_finite() && self.cost_per_km >= 0.0) {
            return invalid("cost_per_km must be finite and non-negative");
        }
        if !(self.cost_per_minute.is_finite() && self.cost_per_minute >= 0.0) {
            return invalid("cost_per_minute must be finite and non-negative");
        }
        Ok(())
    }

    /// Distance and time between two points.
    ///
    /// Returns [`Segment::IMPOSSIBLE`] when either point is absent so the leg
    /// can never win a minimum-cost comparison.
    pub fn segment_cost(&self, from: Option<&Coordinate>, to: Option<&Coordinate>) -> Segment {
        let (Some(from), Some(to)) = (from, to) else {
            return Segment::IMPOSSIBLE;
        };

        let distance_km = geodesic_km(*from, *to);
        Segment {
            distance_km,
            time_minutes: self.km_to_minutes(distance_km),
        }
    }

    /// Totals for visiting `coords` in order.
    ///
    /// Legs are accumulated at full precision and only the final totals are
    /// rounded.
    pub fn route_cost(&self, coords: &[Coordinate]) -> RouteMetrics {
        if coords.len() < 2 {
            return RouteMetrics::ZERO;
        }

        let legs = coords
            .windows(2)
            .map(|leg| self.segment_cost(Some(&leg[0]), Some(&leg[1])));
        self.totals(legs)
    }

    /// Legs between every pair of `coords`, indexed by position.
    pub fn segment_matrix(&self, coords: &[Coordinate]) -> Vec<Vec<Segment>> {
        coords
            .iter()
            .map(|from| {
                coords
                    .iter()
                    .map(|to| self.segment_cost(Some(from), Some(to)))
                    .collect()
            })
            .collect()
    }

    /// Same as [`CostModel::route_cost`] for the coordinates at `path`
    /// positions, reading legs from a precomputed [`CostModel::segment_matrix`].
    pub fn path_cost(&self, matrix: &[Vec<Segment>], path: &[usize]) -> RouteMetrics {
        if path.len() < 2 {
            return RouteMetrics::ZERO;
        }

        let legs = path.windows(2).map(|leg| matrix[leg[0]][leg[1]]);
        self.totals(legs)
    }

    fn totals(&self, legs: impl Iterator<Item = Segment>) -> RouteMetrics {
        let mut total_distance = 0.0;
        let mut total_time = 0.0;
        for segment in legs {
            total_distance += segment.distance_km;
            total_time += segment.time_minutes;
        }

        let cost = total_distance * self.cost_per_km + total_time * self.cost_per_minute;

        RouteMetrics {
            distance_km: round_2dp(total_distance),
            time_minutes: total_time.round_ties_even() as u32,
            cost: round_2dp(cost),
        }
    }

    fn km_to_minutes(&self, km: f64) -> f64 {
        km / self.speed_kmh * 60.0 + self.per_stop_minutes
    }
}

/// [`CostModel::segment_cost`] with the default tariff.
pub fn segment_cost(from: Option<&Coordinate>, to: Option<&Coordinate>) -> Segment {
    CostModel::default().segment_cost(from, to)
}

/// [`CostModel::route_cost`] with the default tariff.
pub fn route_cost(coords: &[Coordinate]) -> RouteMetrics {
    CostModel::default().route_cost(coords)
}

fn geodesic_km(from: Coordinate, to: Coordinate) -> f64 {
    Geodesic.distance(geo::Point::from(from), geo::Point::from(to)) / 1000.0
}

/// Round the exact binary value of `value` to two decimals, ties to even.
///
/// Scaling by 100 first would round the product and misplace values such as
/// 1.115, whose binary representation sits just below the midpoint.
fn round_2dp(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|exact| exact.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        .and_then(|rounded| rounded.to_f64())
        .unwrap_or(value)
}
