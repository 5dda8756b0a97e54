//! Application configuration.
//!
//! The compiled-in `config/default.toml` is used unless `--config` names
//! another file. `CRIME_REPORT_*` environment variables are applied last.

use std::path::{Path, PathBuf};

use crime_report_api::ApiConfig;
use crime_report_ranking::DEFAULT_RANKING_LIMIT;
use crime_report_station::{DEFAULT_AVERAGE_SPEED_KMH, StationFieldMapping};
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Overrides `[api] base_url`.
pub const API_URL_ENV: &str = "CRIME_REPORT_API_URL";
/// Overrides `[api] timeout_secs`.
pub const TIMEOUT_ENV: &str = "CRIME_REPORT_TIMEOUT_SECS";
/// Overrides `[stations] path`.
pub const STATIONS_ENV: &str = "CRIME_REPORT_STATIONS";
/// Bearer credential for backend requests. Never read from a file.
pub const TOKEN_ENV: &str = "CRIME_REPORT_TOKEN";

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {message}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },

    /// The config is not valid TOML for [`AppConfig`].
    #[error("Invalid config: {message}")]
    Parse {
        /// Parser error.
        message: String,
    },

    /// An environment override has an unusable value.
    #[error("Invalid value for {var}: {message}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend connection.
    pub api: ApiConfig,
    /// Station dataset.
    pub stations: StationsConfig,
    /// Crime type ranking.
    pub ranking: RankingConfig,
    /// Travel time estimation.
    pub travel: TravelConfig,
}

/// `[stations]` table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct StationsConfig {
    /// Dataset to load instead of the embedded one.
    pub path: Option<PathBuf>,
    /// Property names used by the dataset.
    pub fields: StationFieldMapping,
}

/// `[ranking]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Number of crime types to offer, including `Others`.
    pub limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RANKING_LIMIT,
        }
    }
}

/// `[travel]` table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TravelConfig {
    /// Average speed for the travel-time heuristic.
    pub average_speed_kmh: f64,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
        }
    }
}

impl AppConfig {
    /// Loads the config file (or the embedded default) and applies
    /// environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or
    /// an override is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let contents =
                    std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                log::debug!("Loading config from {}", path.display());
                Self::parse(&contents)?
            }
            None => Self::parse(DEFAULT_CONFIG)?,
        };

        config.apply_overrides(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    /// Parses a TOML config document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if `contents` is not a valid config.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Applies `CRIME_REPORT_*` overrides looked up through `lookup`.
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if the timeout is not a whole
    /// number of seconds.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let value = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        if let Some(url) = value(API_URL_ENV) {
            self.api.base_url = url.trim().to_string();
        }

        if let Some(secs) = value(TIMEOUT_ENV) {
            self.api.timeout_secs =
                secs.trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| ConfigError::InvalidEnv {
                        var: TIMEOUT_ENV,
                        message: e.to_string(),
                    })?;
        }

        if let Some(path) = value(STATIONS_ENV) {
            self.stations.path = Some(PathBuf::from(path.trim()));
        }

        Ok(())
    }
}
