#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Authenticated HTTP client for the crime report backend.
//!
//! Wraps the three bearer-authenticated endpoints the report flow needs
//! (identity, crime ranking, report submission) plus report history.
//! Requests are sent exactly once; retrying is left to the caller.
//!
//! - Identity: `GET /api/users/email`
//! - Ranking: `GET /api/stations/top-crimes`
//! - Submission: `POST /api/reports`
//! - History: `GET /api/history`

pub mod auth;
pub mod client;
pub mod config;
mod response;

pub use auth::BearerToken;
pub use client::ApiClient;
pub use config::ApiConfig;
pub use crime_report_api_models as models;

use thiserror::Error;

/// Errors from backend API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connection refused, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// The backend rejected the bearer credential (HTTP 401/403).
    #[error("Unauthorized: {}", detail.as_deref().unwrap_or("invalid or expired session"))]
    Unauthorized {
        /// Server-provided detail, if any.
        detail: Option<String>,
    },

    /// The backend returned a non-success status.
    #[error("HTTP {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided detail, if any.
        detail: Option<String>,
    },

    /// The response body could not be decoded.
    #[error("Decode error: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
    },

    /// The client configuration is invalid.
    #[error("Config error: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(e)
        }
    }
}

impl ApiError {
    /// The server-provided detail message, if the server sent one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail } | Self::Status { detail, .. } => detail.as_deref(),
            Self::Http(_) | Self::Timeout | Self::Decode { .. } | Self::Config { .. } => None,
        }
    }
}
