#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Police station catalog and nearest-station lookup.
//!
//! [`StationCatalog`] normalizes a `GeoJSON` station dataset into
//! [`PoliceStation`] values once at startup. [`StationLocator`] answers
//! nearest-station queries over that immutable set using great-circle
//! (haversine) distance.
//!
//! A compiled-in dataset of Singapore police stations is available via
//! [`StationCatalog::embedded`].

pub mod catalog;
pub mod locator;

pub use catalog::{StationCatalog, StationFieldMapping};
pub use crime_report_station_models::{
    Coordinate, InvalidCoordinateError, NearestStationResult, PoliceStation,
};
pub use locator::{DEFAULT_AVERAGE_SPEED_KMH, StationLocator, TIE_EPSILON_KM};

use thiserror::Error;

/// Errors from station catalog and lookup operations.
#[derive(Debug, Error)]
pub enum StationError {
    /// The query coordinate is out of range.
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinateError),

    /// The catalog holds no stations to search.
    #[error("No police stations available")]
    NoStationsAvailable,

    /// The station dataset is missing or cannot be parsed as a whole.
    #[error("Station catalog unavailable: {message}")]
    CatalogUnavailable {
        /// Description of what went wrong.
        message: String,
    },
}
