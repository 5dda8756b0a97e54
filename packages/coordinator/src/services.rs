//! Backend collaborators used by the coordinator.
//!
//! Both traits are implemented for [`ApiClient`]; tests substitute fakes.

use crime_report_api::models::{HistoryEntry, ReportSubmission, SubmissionAck};
use crime_report_api::{ApiClient, ApiError, BearerToken};

/// Resolves a bearer credential to the reporter's identity.
#[async_trait::async_trait]
pub trait IdentityService: Send + Sync {
    /// Returns the email of the user the credential belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the credential is rejected or the request
    /// fails.
    async fn current_email(&self, token: &BearerToken) -> Result<String, ApiError>;
}

/// Persists reports and lists previously filed ones.
#[async_trait::async_trait]
pub trait ReportService: Send + Sync {
    /// Sends a report to the persistence service.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the service rejects the report or the
    /// request fails.
    async fn submit_report(
        &self,
        token: &BearerToken,
        report: &ReportSubmission,
    ) -> Result<SubmissionAck, ApiError>;

    /// Lists reports previously filed by the credential's owner.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails.
    async fn history(&self, token: &BearerToken) -> Result<Vec<HistoryEntry>, ApiError>;
}

#[async_trait::async_trait]
impl IdentityService for ApiClient {
    async fn current_email(&self, token: &BearerToken) -> Result<String, ApiError> {
        Self::current_email(self, token).await
    }
}

#[async_trait::async_trait]
impl ReportService for ApiClient {
    async fn submit_report(
        &self,
        token: &BearerToken,
        report: &ReportSubmission,
    ) -> Result<SubmissionAck, ApiError> {
        Self::submit_report(self, token, report).await
    }

    async fn history(&self, token: &BearerToken) -> Result<Vec<HistoryEntry>, ApiError> {
        Self::history(self, token).await
    }
}
