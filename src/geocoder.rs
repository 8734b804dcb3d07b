//! Geocoder selection.
//!
//! Google is used when an API key is configured; otherwise the public
//! Nominatim instance is the fallback.

use tracing::{info, warn};

use crate::coordinate::Coordinate;
use crate::error::PlannerError;
use crate::google::{GoogleConfig, GoogleGeocoder};
use crate::nominatim::{NominatimClient, NominatimConfig};
use crate::traits::Geocoder;

/// Environment variable holding the Google Geocoding API key.
pub const GOOGLE_MAPS_API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

#[derive(Debug)]
pub enum GeocoderBackend {
    Google(GoogleGeocoder),
    Nominatim(NominatimClient),
}

impl GeocoderBackend {
    /// Google when `api_key` is non-blank, Nominatim otherwise.
    pub fn from_api_key(
        api_key: Option<&str>,
        nominatim: NominatimConfig,
    ) -> Result<Self, PlannerError> {
        match api_key.map(str::trim).filter(|key| !key.is_empty()) {
            Some(key) => {
                info!("Using Google Maps Geocoding API");
                let config = GoogleConfig {
                    api_key: key.to_string(),
                    ..GoogleConfig::default()
                };
                Ok(Self::Google(GoogleGeocoder::new(config)?))
            }
            None => {
                warn!(
                    "Using OpenStreetMap Nominatim; set {} for more reliable geocoding",
                    GOOGLE_MAPS_API_KEY_ENV
                );
                Ok(Self::Nominatim(NominatimClient::new(nominatim)?))
            }
        }
    }

    /// Reads the key from [`GOOGLE_MAPS_API_KEY_ENV`].
    pub fn from_env(nominatim: NominatimConfig) -> Result<Self, PlannerError> {
        let api_key = std::env::var(GOOGLE_MAPS_API_KEY_ENV).ok();
        Self::from_api_key(api_key.as_deref(), nominatim)
    }

    pub fn is_google(&self) -> bool {
        matches!(self, Self::Google(_))
    }
}

impl Geocoder for GeocoderBackend {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, PlannerError> {
        match self {
            Self::Google(geocoder) => geocoder.geocode(address),
            Self::Nominatim(geocoder) => geocoder.geocode(address),
        }
    }
}
