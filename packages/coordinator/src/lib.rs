#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! End-to-end crime report submission.
//!
//! [`ReportCoordinator`] runs a report attempt as a fixed linear sequence
//! of [`ReportStep`]s:
//!
//! 1. **Validate location**: a coordinate and a real location name are
//!    required.
//! 2. **Resolve identity**: the bearer credential is exchanged for the
//!    reporter's email.
//! 3. **Resolve station**: the nearest police station is looked up.
//! 4. **Submit**: the composed [`CrimeReport`] is sent to the backend.
//!
//! The first failing step ends the attempt with a [`ReportError`]; later
//! steps never run, so nothing is written unless every earlier step
//! succeeded. Nothing is retried automatically.

pub mod coordinator;
pub mod services;

use chrono::{DateTime, Utc};
use crime_report_api::models::ReportSubmission;
use crime_report_crime_models::CrimeTypeId;
use crime_report_station::{Coordinate, StationError};
use serde::Serialize;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

pub use coordinator::{ReportContext, ReportCoordinator, ReportRequest, SubmittedReport};
pub use services::{IdentityService, ReportService};

/// Location name reported by the device when reverse geocoding found
/// nothing usable.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// A stage of the report flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStep {
    /// Check the coordinate and location name.
    ValidateLocation,
    /// Exchange the credential for the reporter's email.
    ResolveIdentity,
    /// Find the nearest police station.
    ResolveStation,
    /// Send the report to the backend.
    Submit,
    /// Fetch previously filed reports. Not part of the submission sequence.
    FetchHistory,
}

/// Terminal failure of a report attempt.
#[derive(Debug, Error)]
pub enum ReportError {
    /// No usable location; the user must pick one manually.
    #[error("Location unavailable, manual selection required")]
    NeedsManualLocation,

    /// No credential, or the backend rejected it.
    #[error("Not authenticated{}", detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Unauthenticated {
        /// Server-provided detail, if any.
        detail: Option<String>,
    },

    /// The nearest station could not be determined.
    #[error("Station resolution failed: {0}")]
    StationResolutionFailed(#[from] StationError),

    /// The backend did not accept the report.
    #[error("Submission failed: {message}")]
    SubmissionFailed {
        /// Server detail when available, a generic message otherwise.
        message: String,
    },

    /// Report history could not be loaded.
    #[error("History unavailable: {message}")]
    HistoryUnavailable {
        /// Description of the failure.
        message: String,
    },

    /// A network-bound step did not finish in time.
    #[error("Timed out during {step}")]
    Timeout {
        /// The step that timed out.
        step: ReportStep,
    },
}

/// Message shown when the backend rejects a submission without detail.
pub const GENERIC_SUBMISSION_FAILURE: &str = "Failed to submit report. Please try again.";

impl ReportError {
    /// The step at which the attempt ended.
    #[must_use]
    pub const fn step(&self) -> ReportStep {
        match self {
            Self::NeedsManualLocation => ReportStep::ValidateLocation,
            Self::Unauthenticated { .. } => ReportStep::ResolveIdentity,
            Self::StationResolutionFailed(_) => ReportStep::ResolveStation,
            Self::SubmissionFailed { .. } => ReportStep::Submit,
            Self::HistoryUnavailable { .. } => ReportStep::FetchHistory,
            Self::Timeout { step } => *step,
        }
    }

    /// An actionable message for the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NeedsManualLocation => {
                "We couldn't determine your location. Please select your location manually."
                    .to_string()
            }
            Self::Unauthenticated { .. } => {
                "Your session has expired. Please log in again.".to_string()
            }
            Self::StationResolutionFailed(StationError::InvalidCoordinate(_)) => {
                "Your location looks invalid. Please select your location manually.".to_string()
            }
            Self::StationResolutionFailed(_) => {
                "We couldn't find a nearby police station. Please try again.".to_string()
            }
            Self::SubmissionFailed { message } => message.clone(),
            Self::HistoryUnavailable { .. } => {
                "We couldn't load your reports. Please try again.".to_string()
            }
            Self::Timeout { .. } => "The request timed out. Please try again.".to_string(),
        }
    }
}

/// A report composed from a successful attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrimeReport {
    /// Crime type chosen by the user.
    pub crime_type: CrimeTypeId,
    /// Human-readable location name.
    pub location_name: String,
    /// Where the incident was reported from.
    pub coordinate: Coordinate,
    /// Reporter email resolved from the credential.
    pub reporter_email: String,
    /// Name of the station the report is filed with.
    pub police_station_name: String,
    /// Server-assigned creation time, once known.
    pub created_at: Option<DateTime<Utc>>,
}

impl CrimeReport {
    /// The submission request body for this report.
    #[must_use]
    pub fn to_submission(&self) -> ReportSubmission {
        ReportSubmission {
            crime_type: self.crime_type.title().to_string(),
            location: self.location_name.clone(),
            email: self.reporter_email.clone(),
            latitude: self.coordinate.latitude,
            longitude: self.coordinate.longitude,
            police_station: self.police_station_name.clone(),
        }
    }
}
