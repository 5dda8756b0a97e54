//! Immutable police station catalog loaded from a `GeoJSON` dataset.
//!
//! Each `Point` feature becomes one [`PoliceStation`]. Property names are
//! resolved through a [`StationFieldMapping`] so datasets with different
//! naming conventions can be loaded without code changes. Features that
//! lack a name or a usable point geometry are skipped with a warning; only
//! a missing or unparseable dataset fails the whole load.

use std::path::Path;

use crime_report_station_models::{Coordinate, PoliceStation};
use geojson::{Feature, GeoJson};
use serde::Deserialize;

use crate::StationError;

/// Compiled-in Singapore police station dataset.
const EMBEDDED_STATIONS: &str = include_str!("../data/stations.geojson");

/// Maps dataset property names onto [`PoliceStation`] fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StationFieldMapping {
    /// Property holding the station name. Required per feature.
    pub name: String,
    /// Property holding the station type.
    pub station_type: String,
    /// Property holding the contact number.
    pub telephone: String,
    /// Property holding the division code.
    pub division_code: String,
}

impl Default for StationFieldMapping {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            station_type: "type".to_string(),
            telephone: "telephone".to_string(),
            division_code: "division_code".to_string(),
        }
    }
}

/// The full set of known police stations.
///
/// Enumeration order follows the dataset's feature order and is used as
/// the tie-break order for nearest-station lookups.
#[derive(Debug, Clone, Default)]
pub struct StationCatalog {
    stations: Vec<PoliceStation>,
}

impl StationCatalog {
    /// Creates a catalog from already-normalized stations.
    #[must_use]
    pub const fn new(stations: Vec<PoliceStation>) -> Self {
        Self { stations }
    }

    /// Loads the compiled-in dataset with the default field mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::CatalogUnavailable`] if the embedded
    /// dataset fails to parse.
    pub fn embedded() -> Result<Self, StationError> {
        Self::from_geojson_str(EMBEDDED_STATIONS, &StationFieldMapping::default())
    }

    /// Loads a `GeoJSON` dataset from disk.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::CatalogUnavailable`] if the file cannot be
    /// read or is not a `GeoJSON` `FeatureCollection`.
    pub fn from_path(path: &Path, fields: &StationFieldMapping) -> Result<Self, StationError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| StationError::CatalogUnavailable {
                message: format!("Failed to read {}: {e}", path.display()),
            })?;
        Self::from_geojson_str(&contents, fields)
    }

    /// Parses a `GeoJSON` `FeatureCollection` into a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StationError::CatalogUnavailable`] if the input is not
    /// valid `GeoJSON` or is not a `FeatureCollection`.
    pub fn from_geojson_str(
        geojson_str: &str,
        fields: &StationFieldMapping,
    ) -> Result<Self, StationError> {
        let geojson: GeoJson =
            geojson_str
                .parse()
                .map_err(|e| StationError::CatalogUnavailable {
                    message: format!("Failed to parse station GeoJSON: {e}"),
                })?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(StationError::CatalogUnavailable {
                message: "Station dataset is not a FeatureCollection".to_string(),
            });
        };

        let total = collection.features.len();
        let stations: Vec<PoliceStation> = collection
            .features
            .iter()
            .enumerate()
            .filter_map(|(idx, feature)| {
                let station = normalize_feature(feature, fields);
                if station.is_none() {
                    log::warn!("Skipping station feature {idx}: missing name or point geometry");
                }
                station
            })
            .collect();

        log::info!(
            "Loaded {} police stations ({} skipped)",
            stations.len(),
            total - stations.len()
        );

        Ok(Self { stations })
    }

    /// Returns every station in enumeration order.
    #[must_use]
    pub fn all_stations(&self) -> &[PoliceStation] {
        &self.stations
    }

    /// Looks up a station by exact name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&PoliceStation> {
        self.stations.iter().find(|s| s.name == name)
    }

    /// Number of stations in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns `true` if the catalog holds no stations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Normalizes one `GeoJSON` feature. Returns `None` for features without
/// a name or without a valid `[longitude, latitude]` point.
fn normalize_feature(feature: &Feature, fields: &StationFieldMapping) -> Option<PoliceStation> {
    let name = property_string(feature, &fields.name).filter(|s| !s.is_empty())?;

    let geometry = feature.geometry.as_ref()?;
    let geojson::Value::Point(position) = &geometry.value else {
        return None;
    };
    let (&longitude, &latitude) = (position.first()?, position.get(1)?);

    let coordinate = Coordinate {
        latitude,
        longitude,
    };
    if !coordinate.is_valid() {
        return None;
    }

    Some(PoliceStation {
        name,
        station_type: property_string(feature, &fields.station_type).unwrap_or_default(),
        telephone: property_string(feature, &fields.telephone).unwrap_or_default(),
        division_code: property_string(feature, &fields.division_code).unwrap_or_default(),
        coordinate,
    })
}

/// Reads a property as a trimmed string. Numbers are stringified so
/// telephone numbers and numeric division codes survive.
fn property_string(feature: &Feature, key: &str) -> Option<String> {
    match feature.property(key)? {
        serde_json::Value::String(s) => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
