#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Request and response types for the crime report backend API.
//!
//! Field names follow the backend's `snake_case` JSON contract. These
//! types are kept separate from the domain types so the wire format can
//! evolve independently.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /api/users/email` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailResponse {
    /// Email of the user the bearer credential belongs to.
    pub email: String,
}

/// `GET /api/stations/top-crimes` response.
///
/// The backend returns either a bare array or an object wrapping it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RankingResponse {
    /// `["Robbery", "Snatch Theft"]`
    List(Vec<String>),
    /// `{"crime_types": ["Robbery", "Snatch Theft"]}`
    Wrapped {
        /// Crime type names, most frequent first.
        crime_types: Vec<String>,
    },
}

impl RankingResponse {
    /// Returns the crime type names, most frequent first.
    #[must_use]
    pub fn into_names(self) -> Vec<String> {
        match self {
            Self::List(names) | Self::Wrapped { crime_types: names } => names,
        }
    }
}

/// Query parameters for `GET /api/stations/top-crimes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingQuery {
    /// Station name as it appears in the station dataset.
    pub station_name: String,
    /// Division the station reports under.
    pub division_code: String,
    /// Maximum number of names to return.
    pub limit: usize,
}

/// `POST /api/reports` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSubmission {
    /// Crime type title chosen by the user.
    pub crime_type: String,
    /// Human-readable location name.
    pub location: String,
    /// Reporter email resolved from the bearer credential.
    pub email: String,
    /// Incident latitude.
    pub latitude: f64,
    /// Incident longitude.
    pub longitude: f64,
    /// Name of the station the report is filed with.
    pub police_station: String,
}

/// `POST /api/reports` success response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionAck {
    /// Human-readable acknowledgement.
    #[serde(default, alias = "message")]
    pub msg: Option<String>,
    /// Server-assigned report ID, if returned.
    #[serde(default)]
    pub id: Option<i64>,
    /// Server-assigned creation time, if returned.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl SubmissionAck {
    /// Parses [`Self::created_at`] into a UTC timestamp.
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_server_timestamp)
    }
}

/// One entry of `GET /api/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Reported crime type title.
    pub crime_type: String,
    /// Reported location name.
    pub location: String,
    /// Server-assigned creation time, as sent by the server.
    pub created_at: String,
}

impl HistoryEntry {
    /// Parses [`Self::created_at`] into a UTC timestamp.
    #[must_use]
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_server_timestamp(&self.created_at)
    }
}

/// Error payload returned by the backend on non-2xx responses.
///
/// The backend usually sends `{"detail": "..."}`; validation failures
/// send `detail` as an array of objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable detail (string or structured).
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    /// Alternate error field used by some handlers.
    #[serde(default)]
    pub error: Option<String>,
    /// Alternate message field used by some handlers.
    #[serde(default)]
    pub msg: Option<String>,
}

impl ApiErrorBody {
    /// Returns the most specific human-readable message in the payload.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        let detail = self.detail.as_ref().and_then(|detail| match detail {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        });

        detail
            .or_else(|| self.error.clone())
            .or_else(|| self.msg.clone())
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

/// Parses a server timestamp. Accepts RFC 3339 and the naive
/// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` forms, treated as UTC.
#[must_use]
pub fn parse_server_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
