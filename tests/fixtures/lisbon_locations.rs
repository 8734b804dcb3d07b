//! Real Lisbon locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use route_planner::{Coordinate, Geocoder, PlannerError, Stop};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng).expect("fixture coordinate")
    }

    pub fn stop(&self) -> Stop {
        Stop::new(self.name, self.coordinate())
    }
}

/// Good depot / origin location.
pub const DEPOT: Location = Location::new("Mercado da Ribeira", 38.7068, -9.1458);

pub const LANDMARKS: &[Location] = &[
    Location::new("Praça do Comércio", 38.7075, -9.1364),
    Location::new("Castelo de São Jorge", 38.7139, -9.1335),
    Location::new("Torre de Belém", 38.6916, -9.2160),
    Location::new("Mosteiro dos Jerónimos", 38.6979, -9.2068),
    Location::new("Oceanário de Lisboa", 38.7633, -9.0937),
    Location::new("Estação do Oriente", 38.7679, -9.0990),
    Location::new("Marquês de Pombal", 38.7253, -9.1500),
    Location::new("Aeroporto Humberto Delgado", 38.7742, -9.1342),
    Location::new("Estádio da Luz", 38.7527, -9.1847),
    Location::new("Museu Gulbenkian", 38.7370, -9.1545),
    Location::new("LX Factory", 38.7033, -9.1786),
    Location::new("Cais do Sodré", 38.7060, -9.1443),
];

/// The first `count` landmarks as delivery stops.
pub fn delivery_stops(count: usize) -> Vec<Stop> {
    LANDMARKS.iter().take(count).map(Location::stop).collect()
}

/// Geocoder backed by the fixture table. Records every lookup.
#[derive(Debug, Default)]
pub struct FixtureGeocoder {
    known: HashMap<String, Coordinate>,
    pub lookups: RefCell<Vec<String>>,
}

impl FixtureGeocoder {
    pub fn new() -> Self {
        let mut known = HashMap::new();
        known.insert(DEPOT.name.to_string(), DEPOT.coordinate());
        for location in LANDMARKS {
            known.insert(location.name.to_string(), location.coordinate());
        }
        Self {
            known,
            lookups: RefCell::new(Vec::new()),
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.borrow().len()
    }
}

impl Geocoder for FixtureGeocoder {
    fn geocode(&self, address: &str) -> Result<Option<Coordinate>, PlannerError> {
        self.lookups.borrow_mut().push(address.to_string());
        Ok(self.known.get(address).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_in_lisbon_area() {
        for loc in LANDMARKS.iter().chain(std::iter::once(&DEPOT)) {
            assert!(loc.lat > 38.6 && loc.lat < 38.8, "{} lat out of range: {}", loc.name, loc.lat);
            assert!(loc.lng > -9.3 && loc.lng < -9.0, "{} lng out of range: {}", loc.name, loc.lng);
        }
    }
}
