//! Nearest-station search by great-circle distance.
//!
//! A linear scan over the catalog. The station set is small and static,
//! so every query computes the haversine distance to every station and
//! keeps the minimum.

use std::sync::Arc;

use crime_report_station_models::{Coordinate, NearestStationResult, PoliceStation};
use geo::{Distance as _, Haversine, Point};

use crate::{StationCatalog, StationError};

/// Assumed average urban travel speed used for travel-time estimates.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 30.0;

/// Stations closer together than this (1 metre) count as equidistant;
/// the one enumerated first in the catalog wins.
pub const TIE_EPSILON_KM: f64 = 0.001;

/// Resolves coordinates to the nearest police station.
#[derive(Debug, Clone)]
pub struct StationLocator {
    catalog: Arc<StationCatalog>,
    average_speed_kmh: f64,
}

impl StationLocator {
    /// Creates a locator using [`DEFAULT_AVERAGE_SPEED_KMH`].
    #[must_use]
    pub const fn new(catalog: Arc<StationCatalog>) -> Self {
        Self {
            catalog,
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
        }
    }

    /// Overrides the average speed used for travel-time estimates.
    /// Non-positive or non-finite values keep the current speed.
    #[must_use]
    pub fn with_average_speed_kmh(mut self, speed_kmh: f64) -> Self {
        if speed_kmh.is_finite() && speed_kmh > 0.0 {
            self.average_speed_kmh = speed_kmh;
        } else {
            log::warn!("Ignoring invalid average speed {speed_kmh} km/h");
        }
        self
    }

    /// The catalog this locator searches.
    #[must_use]
    pub fn catalog(&self) -> &StationCatalog {
        &self.catalog
    }

    /// Finds the station closest to `coordinate`.
    ///
    /// # Errors
    ///
    /// * [`StationError::InvalidCoordinate`] if `coordinate` is out of range
    /// * [`StationError::NoStationsAvailable`] if the catalog is empty
    pub fn nearest(&self, coordinate: Coordinate) -> Result<NearestStationResult, StationError> {
        coordinate.validate()?;

        let ranked = self.distances(coordinate);
        let (station, distance_km) = closest(&ranked)
            .map(|idx| ranked[idx])
            .ok_or(StationError::NoStationsAvailable)?;
        log::debug!(
            "Nearest station to {coordinate}: {} ({distance_km:.3} km)",
            station.name
        );

        Ok(self.result(station, distance_km))
    }

    /// Returns up to `count` stations ordered by ascending distance.
    ///
    /// The first entry is always the station [`Self::nearest`] picks, so
    /// the tie-break within [`TIE_EPSILON_KM`] applies here too. The rest
    /// follow in ascending distance, with equal distances in catalog
    /// order.
    ///
    /// # Errors
    ///
    /// * [`StationError::InvalidCoordinate`] if `coordinate` is out of range
    /// * [`StationError::NoStationsAvailable`] if the catalog is empty
    pub fn nearest_n(
        &self,
        coordinate: Coordinate,
        count: usize,
    ) -> Result<Vec<NearestStationResult>, StationError> {
        coordinate.validate()?;

        let mut ranked = self.distances(coordinate);
        let head = closest(&ranked).ok_or(StationError::NoStationsAvailable)?;
        let head = ranked.remove(head);
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

        Ok(std::iter::once(head)
            .chain(ranked)
            .take(count)
            .map(|(station, distance_km)| self.result(station, distance_km))
            .collect())
    }

    /// Estimated minutes to cover `distance_km` at the configured speed.
    #[must_use]
    pub fn travel_time_minutes(&self, distance_km: f64) -> f64 {
        distance_km / self.average_speed_kmh * 60.0
    }

    fn distances(&self, coordinate: Coordinate) -> Vec<(&PoliceStation, f64)> {
        self.catalog
            .all_stations()
            .iter()
            .map(|station| (station, haversine_km(coordinate, station.coordinate)))
            .collect()
    }

    fn result(&self, station: &PoliceStation, distance_km: f64) -> NearestStationResult {
        NearestStationResult {
            station: station.clone(),
            distance_km,
            travel_time_minutes: self.travel_time_minutes(distance_km),
        }
    }
}

/// Index of the closest entry. A later entry only wins if it is closer
/// by at least [`TIE_EPSILON_KM`].
fn closest(ranked: &[(&PoliceStation, f64)]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, &(_, distance_km)) in ranked.iter().enumerate() {
        match best {
            Some((_, best_km)) if distance_km >= best_km - TIE_EPSILON_KM => {}
            _ => best = Some((idx, distance_km)),
        }
    }

    best.map(|(idx, _)| idx)
}

/// Great-circle distance between two coordinates in kilometres.
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let from = Point::new(a.longitude, a.latitude);
    let to = Point::new(b.longitude, b.latitude);
    Haversine.distance(from, to) / 1000.0
}
