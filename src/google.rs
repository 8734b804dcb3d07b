//! Google Geocoding API HTTP geocoder.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::coordinate::Coordinate;
use crate::error::PlannerError;
use crate::traits::Geocoder;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
            api_key: String::new(),
            timeout_secs: 15,
        }
    }
}

/// Single-query geocoder. The API is keyed and quota-billed, so requests are
/// not spaced out the way the public Nominatim instance requires.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    config: GoogleConfig,
    client: reqwest::blocking::Client,
}

impl GoogleGeocoder {
    pub fn new(config: GoogleConfig) -> Result<Self, PlannerError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl Geocoder for GoogleGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, PlannerError> {
        let query = address.trim();
        if query.is_empty() {
            return Ok(None);
        }

        debug!(query = %query, "geocoding");
        let body = self
            .client
            .get(&self.config.base_url)
            .query(&[("address", query), ("key", self.config.api_key.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<GoogleResponse>())?;

        match body.status.as_str() {
            "OK" => match body.results.into_iter().next() {
                Some(result) => {
                    let location = result.geometry.location;
                    Coordinate::new(location.lat, location.lng).map(Some)
                }
                None => Ok(None),
            },
            "ZERO_RESULTS" => {
                warn!(address = %address, "no geocoding match");
                Ok(None)
            }
            status => Err(PlannerError::Geocoding(match body.error_message {
                Some(message) => format!("{}: {}", status, message),
                None => status.to_string(),
            })),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    status: String,
    #[serde(default)]
    results: Vec<GoogleResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    geometry: GoogleGeometry,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: GoogleLocation,
}

#[derive(Debug, Deserialize)]
struct GoogleLocation {
    lat: f64,
    lng: f64,
}
