//! Nominatim (OpenStreetMap) HTTP geocoder.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::coordinate::Coordinate;
use crate::error::PlannerError;
use crate::traits::Geocoder;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent.
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Minimum spacing between requests. The public instance allows one per second.
    pub min_interval_ms: u64,
    /// Appended as ", <hint>" when the plain query finds nothing.
    pub country_hint: Option<String>,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "route-planner".to_string(),
            timeout_secs: 10,
            min_interval_ms: 1000,
            country_hint: None,
        }
    }
}

#[derive(Debug)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig) -> Result<Self, PlannerError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            config,
            client,
            last_request: Mutex::new(None),
        })
    }

    fn search(&self, query: &str) -> Result<Option<Coordinate>, PlannerError> {
        self.throttle();

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));
        let places = self
            .client
            .get(url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<NominatimPlace>>())?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let lat = place.lat.parse::<f64>();
        let lon = place.lon.parse::<f64>();
        match (lat, lon) {
            (Ok(lat), Ok(lon)) => Coordinate::new(lat, lon).map(Some),
            _ => Err(PlannerError::Geocoding(format!(
                "unparseable coordinates \"{}\", \"{}\"",
                place.lat, place.lon
            ))),
        }
    }

    /// Sleep until `min_interval_ms` has passed since the previous request.
    fn throttle(&self) {
        let interval = Duration::from_millis(self.config.min_interval_ms);
        let mut last = match self.last_request.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < interval {
                std::thread::sleep(interval - elapsed);
            }
        }
        *last = Some(Instant::now());
    }
}

impl Geocoder for NominatimClient {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, PlannerError> {
        let queries = fallback_queries(address, self.config.country_hint.as_deref());
        if queries.is_empty() {
            return Ok(None);
        }

        for query in &queries {
            debug!(query = %query, "geocoding");
            if let Some(coordinate) = self.search(query)? {
                return Ok(Some(coordinate));
            }
        }

        warn!(address = %address, "no geocoding match");
        Ok(None)
    }
}

/// Queries to try in order: as given, with the country hint, and without a
/// leading house number.
fn fallback_queries(address: &str, country_hint: Option<&str>) -> Vec<String> {
    let query = address.trim();
    if query.is_empty() {
        return Vec::new();
    }

    let mut queries = vec![query.to_string()];
    if let Some(country) = country_hint {
        queries.push(format!("{}, {}", query, country));
    }

    let mut parts = query.split_whitespace();
    if let Some(first) = parts.next() {
        let rest = parts.collect::<Vec<_>>().join(" ");
        if !rest.is_empty() && first.chars().all(|c| c.is_ascii_digit()) {
            queries.push(rest);
        }
    }

    queries
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}
