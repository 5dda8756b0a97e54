#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Coordinate and police station types.
//!
//! These are the plain data types exchanged between the station catalog,
//! the nearest-station locator and the report coordinator. Stations are
//! immutable once loaded; lookup results are created fresh per query.

use serde::{Deserialize, Serialize};

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, `-90..=90`.
    pub latitude: f64,
    /// Longitude in degrees, `-180..=180`.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, validating that both components are in range.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinateError`] if either component is out of
    /// range or not a finite number.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinateError> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Returns `true` if latitude and longitude are finite and in range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Checks the range invariant.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinateError`] if the coordinate is out of range.
    pub fn validate(&self) -> Result<(), InvalidCoordinateError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(InvalidCoordinateError {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Error returned when a latitude/longitude pair is out of range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidCoordinateError {
    /// The rejected latitude.
    pub latitude: f64,
    /// The rejected longitude.
    pub longitude: f64,
}

impl std::fmt::Display for InvalidCoordinateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid coordinate ({}, {}): expected latitude in -90..=90 and longitude in -180..=180",
            self.latitude, self.longitude
        )
    }
}

impl std::error::Error for InvalidCoordinateError {}

/// A police station from the station dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoliceStation {
    /// Station name (e.g. "Rochor Neighbourhood Police Centre").
    pub name: String,
    /// Station type (e.g. "Neighbourhood Police Centre").
    pub station_type: String,
    /// Public contact number.
    pub telephone: String,
    /// Jurisdiction the station reports under. Keys crime-ranking lookups.
    pub division_code: String,
    /// Station location.
    pub coordinate: Coordinate,
}

/// The outcome of a nearest-station lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearestStationResult {
    /// The matched station.
    pub station: PoliceStation,
    /// Great-circle distance from the query point, in kilometres.
    pub distance_km: f64,
    /// Estimated travel time in minutes at the configured average speed.
    pub travel_time_minutes: f64,
}

impl NearestStationResult {
    /// Formats the distance/time line shown under the station name,
    /// e.g. `"1.24 km, ~4 mins away"`.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{:.2} km, ~{:.0} mins away",
            self.distance_km, self.travel_time_minutes
        )
    }
}
