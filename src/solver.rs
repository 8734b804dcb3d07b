//! Exhaustive route enumeration.
//!
//! Every ordering of the delivery stops is scored with the [`CostModel`]. The
//! search is factorial, which is only acceptable because the stop count is
//! capped by [`SolveOptions::max_stops`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::coordinate::{Coordinate, Stop};
use crate::cost::{CostModel, RouteMetrics};
use crate::error::PlannerError;
use crate::permutation::{factorial, Permutations};

/// Default ceiling on origin plus delivery stops (9! orderings).
pub const DEFAULT_MAX_STOPS: usize = 10;

/// Default number of ranked alternatives returned.
pub const DEFAULT_MAX_ALTERNATIVES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// Maximum stops including the origin.
    pub max_stops: usize,
    /// Maximum number of ranked alternatives to keep.
    pub max_alternatives: usize,
    /// Tariff used to score each candidate.
    pub cost_model: CostModel,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_stops: DEFAULT_MAX_STOPS,
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
            cost_model: CostModel::default(),
        }
    }
}

/// One complete delivery run.
///
/// `labels` and `coordinates` run in parallel: origin first, then the
/// deliveries in visiting order, then the origin again when returning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    /// Indices into the delivery stop list, in visiting order.
    pub visit_order: Vec<usize>,
    pub labels: Vec<String>,
    pub coordinates: Vec<Coordinate>,
    pub metrics: RouteMetrics,
}

/// An input stop with its resolved coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStop {
    /// 0 for the origin, `i + 1` for delivery `i`.
    pub index: usize,
    pub label: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerResult {
    /// First-enumerated route with the minimum cost.
    pub best_route: RouteResult,
    /// Cheapest routes, ascending by cost; ties keep enumeration order.
    pub alternatives: Vec<RouteResult>,
    pub total_permutations: usize,
    /// Every input stop in input order, origin first.
    pub stops: Vec<ResolvedStop>,
}

#[derive(Debug, Clone)]
struct Candidate {
    order: Vec<usize>,
    metrics: RouteMetrics,
}

/// Find the cheapest order to visit `delivery_stops` starting from `origin`.
///
/// Fails without evaluating anything when the cost model is invalid, when
/// there are no deliveries, when the total stop count exceeds
/// [`SolveOptions::max_stops`], or when any stop lacks a coordinate.
pub fn enumerate_routes(
    origin: &Stop,
    delivery_stops: &[Stop],
    return_to_start: bool,
    options: &SolveOptions,
) -> Result<PlannerResult, PlannerError> {
    options.cost_model.validate()?;

    if delivery_stops.is_empty() {
        return Err(PlannerError::TooFewStops);
    }

    let count = delivery_stops.len() + 1;
    if count > options.max_stops {
        return Err(PlannerError::TooManyStops {
            count,
            max: options.max_stops,
        });
    }

    let origin_coord = resolved(origin)?;
    let delivery_coords = delivery_stops
        .iter()
        .map(resolved)
        .collect::<Result<Vec<_>, _>>()?;

    let n = delivery_stops.len();
    info!("Analyzing {} possible routes", factorial(n));

    // Position 0 is the origin, delivery i sits at position i + 1
    let positions: Vec<Coordinate> = std::iter::once(origin_coord)
        .chain(delivery_coords.iter().copied())
        .collect();
    let matrix = options.cost_model.segment_matrix(&positions);

    let mut best: Option<Candidate> = None;
    let limit = options.max_alternatives.min(factorial(n));
    let mut ranked: Vec<Candidate> = Vec::with_capacity(limit.saturating_add(1));
    let mut total_permutations = 0;
    let mut path = Vec::with_capacity(n + 2);

    for order in Permutations::new(n) {
        total_permutations += 1;

        path.clear();
        path.push(0);
        path.extend(order.iter().map(|&i| i + 1));
        if return_to_start {
            path.push(0);
        }

        let candidate = Candidate {
            order,
            metrics: options.cost_model.path_cost(&matrix, &path),
        };

        // Strict comparison keeps the first-enumerated minimum
        if best
            .as_ref()
            .is_none_or(|b| candidate.metrics.cost < b.metrics.cost)
        {
            best = Some(candidate.clone());
        }

        keep_ranked(&mut ranked, candidate, limit);
    }

    let Some(best) = best else {
        return Err(PlannerError::TooFewStops);
    };

    debug!(
        cost = best.metrics.cost,
        distance_km = best.metrics.distance_km,
        time_minutes = best.metrics.time_minutes,
        "best route found after {} permutations",
        total_permutations
    );

    let build = |candidate: Candidate| {
        build_route(
            origin,
            delivery_stops,
            origin_coord,
            &delivery_coords,
            return_to_start,
            candidate,
        )
    };

    let stops = std::iter::once(origin)
        .chain(delivery_stops)
        .zip(&positions)
        .enumerate()
        .map(|(index, (stop, coordinate))| ResolvedStop {
            index,
            label: stop.label.clone(),
            coordinate: *coordinate,
        })
        .collect();

    Ok(PlannerResult {
        best_route: build(best),
        alternatives: ranked.into_iter().map(build).collect(),
        total_permutations,
        stops,
    })
}

fn resolved(stop: &Stop) -> Result<Coordinate, PlannerError> {
    stop.coordinate.ok_or_else(|| PlannerError::UnresolvedAddress {
        address: stop.label.clone(),
    })
}

/// Insert `candidate` into the ascending top-`limit` list.
///
/// Equal costs go after existing entries, so the list always matches a
/// stable sort of every candidate truncated to `limit`.
fn keep_ranked(ranked: &mut Vec<Candidate>, candidate: Candidate, limit: usize) {
    let position = ranked.partition_point(|c| c.metrics.cost <= candidate.metrics.cost);
    if position >= limit {
        return;
    }

    ranked.insert(position, candidate);
    ranked.truncate(limit);
}

fn build_route(
    origin: &Stop,
    delivery_stops: &[Stop],
    origin_coord: Coordinate,
    delivery_coords: &[Coordinate],
    return_to_start: bool,
    candidate: Candidate,
) -> RouteResult {
    let len = candidate.order.len() + if return_to_start { 2 } else { 1 };
    let mut labels = Vec::with_capacity(len);
    let mut coordinates = Vec::with_capacity(len);

    labels.push(origin.label.clone());
    coordinates.push(origin_coord);
    for &i in &candidate.order {
        labels.push(delivery_stops[i].label.clone());
        coordinates.push(delivery_coords[i]);
    }
    if return_to_start {
        labels.push(origin.label.clone());
        coordinates.push(origin_coord);
    }

    RouteResult {
        visit_order: candidate.order,
        labels,
        coordinates,
        metrics: candidate.metrics,
    }
}
