//! Ranking source abstraction and the backend-backed implementation.

use crime_report_api::models::RankingQuery;
use crime_report_api::{ApiClient, ApiError, BearerToken};

use crate::RankingError;

/// Supplies crime-type names ranked by how often they are reported at a
/// station, most frequent first.
#[async_trait::async_trait]
pub trait RankingSource: Send + Sync {
    /// Fetches up to `limit` ranked crime-type names for the station.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError`] if the ranking cannot be obtained.
    async fn ranked_crime_types(
        &self,
        station_name: &str,
        division_code: &str,
        limit: usize,
    ) -> Result<Vec<String>, RankingError>;
}

/// Fetches rankings from the backend's `top-crimes` endpoint.
#[derive(Debug, Clone)]
pub struct HttpRankingSource {
    api: ApiClient,
    token: Option<BearerToken>,
}

impl HttpRankingSource {
    /// Creates a source that authenticates with `token`. Without a token
    /// no request is sent and every lookup reports
    /// [`RankingError::Unauthenticated`].
    #[must_use]
    pub const fn new(api: ApiClient, token: Option<BearerToken>) -> Self {
        Self { api, token }
    }
}

#[async_trait::async_trait]
impl RankingSource for HttpRankingSource {
    async fn ranked_crime_types(
        &self,
        station_name: &str,
        division_code: &str,
        limit: usize,
    ) -> Result<Vec<String>, RankingError> {
        let token = self.token.as_ref().ok_or(RankingError::Unauthenticated)?;

        let query = RankingQuery {
            station_name: station_name.to_string(),
            division_code: division_code.to_string(),
            limit,
        };

        self.api
            .top_crimes(token, &query)
            .await
            .map_err(RankingError::from)
    }
}

impl From<ApiError> for RankingError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Timeout => Self::Timeout,
            ApiError::Unauthorized { .. } => Self::Unauthenticated,
            other => Self::Unavailable {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crime_report_api::ApiConfig;

    #[tokio::test]
    async fn missing_token_skips_request() {
        let api = ApiClient::new(&ApiConfig {
            // Nothing listens here; a request would fail with a transport error.
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
        })
        .unwrap();
        let source = HttpRankingSource::new(api, None);

        let err = source
            .ranked_crime_types("S1", "D01", 4)
            .await
            .unwrap_err();
        assert!(matches!(err, RankingError::Unauthenticated));
    }

    #[test]
    fn api_errors_map_to_ranking_errors() {
        assert!(matches!(
            RankingError::from(ApiError::Timeout),
            RankingError::Timeout
        ));
        assert!(matches!(
            RankingError::from(ApiError::Unauthorized { detail: None }),
            RankingError::Unauthenticated
        ));
        assert!(matches!(
            RankingError::from(ApiError::Status {
                status: 503,
                detail: None
            }),
            RankingError::Unavailable { .. }
        ));
    }
}
