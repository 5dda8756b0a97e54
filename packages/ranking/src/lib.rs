#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-station crime type ranking.
//!
//! Asks a [`RankingSource`] for the crime types most frequently reported
//! at a station and maps the returned names onto the local
//! [`CrimeTypeId`] catalog. The result always ends with
//! [`CrimeTypeId::Others`], and a failed or empty ranking falls back to
//! [`CrimeTypeId::DEFAULT_ORDER`] so the report flow never blocks on it.

pub mod source;

use std::sync::Arc;
use std::time::Duration;

use crime_report_crime_models::{CrimeType, CrimeTypeId};
use serde::Serialize;
use thiserror::Error;

pub use source::{HttpRankingSource, RankingSource};

/// Number of crime types shown when the caller does not ask otherwise.
pub const DEFAULT_RANKING_LIMIT: usize = 4;

/// Default bound on a ranking lookup.
pub const DEFAULT_RANKING_TIMEOUT: Duration = Duration::from_secs(5);

/// Why a ranking could not be fetched. Always recovered by falling back.
#[derive(Debug, Error)]
pub enum RankingError {
    /// The ranking service failed or returned something unusable.
    #[error("Ranking unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },

    /// No credential was available to call the ranking service.
    #[error("Ranking unavailable: not authenticated")]
    Unauthenticated,

    /// The ranking service did not answer in time.
    #[error("Ranking timed out")]
    Timeout,
}

/// Where a [`CrimeRanking`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankingOrigin {
    /// Ranked by the station's reporting history.
    Station,
    /// The fixed default ordering.
    Fallback,
}

/// Ordered crime types to offer for one station, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeRanking {
    /// Station the ranking was requested for.
    pub station_name: String,
    /// Division the station reports under.
    pub division_code: String,
    /// Crime types in display order. Contains `Others` exactly once
    /// unless the limit is zero.
    pub crime_types: Vec<CrimeTypeId>,
    /// Whether this is a station ranking or the default fallback.
    pub origin: RankingOrigin,
}

impl CrimeRanking {
    /// Display titles in order.
    #[must_use]
    pub fn titles(&self) -> Vec<&'static str> {
        self.crime_types.iter().map(|id| id.title()).collect()
    }

    /// Full display records in order, for rendering the selection grid.
    #[must_use]
    pub fn crime_type_records(&self) -> Vec<CrimeType> {
        self.crime_types.iter().map(|id| id.crime_type()).collect()
    }

    /// Returns `true` if this is the default fallback ordering.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.origin == RankingOrigin::Fallback
    }
}

/// Produces the crime types to offer for a station.
#[derive(Clone)]
pub struct CrimeRankingClient {
    source: Arc<dyn RankingSource>,
    timeout: Duration,
}

impl std::fmt::Debug for CrimeRankingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrimeRankingClient")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl CrimeRankingClient {
    /// Creates a client bounded by [`DEFAULT_RANKING_TIMEOUT`].
    #[must_use]
    pub fn new(source: Arc<dyn RankingSource>) -> Self {
        Self {
            source,
            timeout: DEFAULT_RANKING_TIMEOUT,
        }
    }

    /// Overrides the lookup timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns at most `limit` crime types for the station, most
    /// frequent first, ending with `Others`.
    ///
    /// Never fails: if the source errors, times out, or yields no
    /// recognizable crime types, the default ordering is returned.
    pub async fn top_crimes(
        &self,
        station_name: &str,
        division_code: &str,
        limit: usize,
    ) -> CrimeRanking {
        let fetched = tokio::time::timeout(
            self.timeout,
            self.source
                .ranked_crime_types(station_name, division_code, limit),
        )
        .await
        .unwrap_or(Err(RankingError::Timeout));

        let ranked = match fetched {
            Ok(names) => rank_names(&names, limit),
            Err(e) => {
                log::warn!(
                    "Ranking for {station_name} ({division_code}) failed, using defaults: {e}"
                );
                None
            }
        };

        let (crime_types, origin) = ranked.map_or_else(
            || (fallback(limit), RankingOrigin::Fallback),
            |ids| (ids, RankingOrigin::Station),
        );

        log::debug!(
            "Crime types for {station_name} ({division_code}) [{origin:?}]: {:?}",
            crime_types
        );

        CrimeRanking {
            station_name: station_name.to_string(),
            division_code: division_code.to_string(),
            crime_types,
            origin,
        }
    }
}

/// Maps ranked crime-type names onto the local catalog.
///
/// Unknown names are dropped with a warning and duplicates keep their
/// first position. Returns `None` when nothing other than `Others`
/// matched, signalling that the default ordering should be used.
#[must_use]
pub fn rank_names(names: &[String], limit: usize) -> Option<Vec<CrimeTypeId>> {
    let mut matched: Vec<CrimeTypeId> = Vec::new();

    for name in names {
        match CrimeTypeId::match_title(name) {
            Some(id) if !matched.contains(&id) => matched.push(id),
            Some(_) => {}
            None => log::warn!("Dropping unrecognized crime type from ranking: {name:?}"),
        }
    }

    if matched.iter().all(|id| *id == CrimeTypeId::Others) {
        return None;
    }

    Some(with_others(matched, limit))
}

/// The default ordering capped to `limit`, ending with `Others`.
#[must_use]
pub fn fallback(limit: usize) -> Vec<CrimeTypeId> {
    with_others(CrimeTypeId::DEFAULT_ORDER.to_vec(), limit)
}

/// Caps `ids` to `limit` entries, making room for `Others` at the end
/// if it is not already among them.
fn with_others(mut ids: Vec<CrimeTypeId>, limit: usize) -> Vec<CrimeTypeId> {
    if limit == 0 {
        return Vec::new();
    }

    ids.truncate(limit);
    if !ids.contains(&CrimeTypeId::Others) {
        if ids.len() == limit {
            ids.pop();
        }
        ids.push(CrimeTypeId::Others);
    }
    ids
}
