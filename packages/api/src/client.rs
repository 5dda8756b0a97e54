//! Backend API client.

use crime_report_api_models::{
    EmailResponse, HistoryEntry, RankingQuery, RankingResponse, ReportSubmission, SubmissionAck,
};

use crate::{ApiConfig, ApiError, BearerToken, response};

/// HTTP client for the crime report backend.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL is not a valid
    /// absolute URL or the HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| ApiError::Config {
            message: format!("Invalid base URL '{base_url}': {e}"),
        })?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Config {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client, base_url })
    }

    /// The normalized base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Resolves the email of the user the credential belongs to.
    ///
    /// `GET /api/users/email`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] if the credential is rejected,
    /// or another [`ApiError`] if the request fails.
    pub async fn current_email(&self, token: &BearerToken) -> Result<String, ApiError> {
        let resp = self
            .client
            .get(self.url("/api/users/email"))
            .bearer_auth(token.expose())
            .send()
            .await?;

        let body: EmailResponse = response::read_json(resp).await?;
        Ok(body.email)
    }

    /// Fetches the most frequently reported crime type names for a
    /// station, most frequent first.
    ///
    /// `GET /api/stations/top-crimes?station_name=..&division_code=..&limit=..`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot
    /// be decoded.
    pub async fn top_crimes(
        &self,
        token: &BearerToken,
        query: &RankingQuery,
    ) -> Result<Vec<String>, ApiError> {
        let resp = self
            .client
            .get(self.url("/api/stations/top-crimes"))
            .bearer_auth(token.expose())
            .query(query)
            .send()
            .await?;

        let body: RankingResponse = response::read_json(resp).await?;
        Ok(body.into_names())
    }

    /// Submits a crime report.
    ///
    /// `POST /api/reports`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails. Server-side rejections
    /// carry the server's `detail` message.
    pub async fn submit_report(
        &self,
        token: &BearerToken,
        report: &ReportSubmission,
    ) -> Result<SubmissionAck, ApiError> {
        let resp = self
            .client
            .post(self.url("/api/reports"))
            .bearer_auth(token.expose())
            .json(report)
            .send()
            .await?;

        response::read_json(resp).await
    }

    /// Lists the reports previously filed by the credential's owner.
    ///
    /// `GET /api/history`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the response cannot
    /// be decoded.
    pub async fn history(&self, token: &BearerToken) -> Result<Vec<HistoryEntry>, ApiError> {
        let resp = self
            .client
            .get(self.url("/api/history"))
            .bearer_auth(token.expose())
            .send()
            .await?;

        response::read_json(resp).await
    }
}
