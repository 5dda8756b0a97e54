//! The report submission state machine.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crime_report_api::models::{HistoryEntry, SubmissionAck};
use crime_report_api::{ApiError, BearerToken};
use crime_report_crime_models::CrimeTypeId;
use crime_report_ranking::{CrimeRanking, CrimeRankingClient, DEFAULT_RANKING_LIMIT};
use crime_report_station::{Coordinate, NearestStationResult, StationLocator};
use serde::Serialize;

use crate::{
    CrimeReport, GENERIC_SUBMISSION_FAILURE, IdentityService, ReportError, ReportService,
    ReportStep, UNKNOWN_LOCATION,
};

/// Default bound on each network-dependent step.
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(5);

/// What the user asked to report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    /// Crime type the user selected.
    pub crime_type: CrimeTypeId,
    /// Location name from reverse geocoding or manual selection.
    pub location_name: Option<String>,
    /// Device or manually chosen coordinate.
    pub coordinate: Option<Coordinate>,
}

/// Everything needed to render the report screen before submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportContext {
    /// Nearest station with distance and travel estimate.
    pub nearest: NearestStationResult,
    /// Crime types to offer, most relevant first.
    pub ranking: CrimeRanking,
}

/// A report the backend accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedReport {
    /// The report as submitted, with the server timestamp if one was
    /// returned.
    pub report: CrimeReport,
    /// The station the report was filed with.
    pub station: NearestStationResult,
    /// The backend's acknowledgement.
    pub acknowledgement: SubmissionAck,
}

/// Orchestrates one report attempt at a time.
///
/// Holds no mutable state; concurrent calls are independent and the
/// coordinator makes no at-most-once guarantee across them.
#[derive(Clone)]
pub struct ReportCoordinator {
    locator: Arc<StationLocator>,
    ranking: CrimeRankingClient,
    identity: Arc<dyn IdentityService>,
    reports: Arc<dyn ReportService>,
    step_timeout: Duration,
    ranking_limit: usize,
}

impl std::fmt::Debug for ReportCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportCoordinator")
            .field("stations", &self.locator.catalog().len())
            .field("step_timeout", &self.step_timeout)
            .field("ranking_limit", &self.ranking_limit)
            .finish_non_exhaustive()
    }
}

impl ReportCoordinator {
    /// Creates a coordinator with [`DEFAULT_STEP_TIMEOUT`] and
    /// [`DEFAULT_RANKING_LIMIT`].
    #[must_use]
    pub fn new(
        locator: Arc<StationLocator>,
        ranking: CrimeRankingClient,
        identity: Arc<dyn IdentityService>,
        reports: Arc<dyn ReportService>,
    ) -> Self {
        Self {
            locator,
            ranking,
            identity,
            reports,
            step_timeout: DEFAULT_STEP_TIMEOUT,
            ranking_limit: DEFAULT_RANKING_LIMIT,
        }
    }

    /// Overrides the per-step timeout for network-dependent steps.
    #[must_use]
    pub const fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }

    /// Overrides how many crime types [`Self::prepare`] offers.
    #[must_use]
    pub const fn with_ranking_limit(mut self, limit: usize) -> Self {
        self.ranking_limit = limit;
        self
    }

    /// The station locator in use.
    #[must_use]
    pub fn locator(&self) -> &StationLocator {
        &self.locator
    }

    /// Resolves the nearest station and then its crime ranking, for
    /// display before the user confirms a report.
    ///
    /// The ranking step never fails; it falls back to the default
    /// crime types.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::StationResolutionFailed`] if no station can
    /// be resolved for `coordinate`.
    pub async fn prepare(&self, coordinate: Coordinate) -> Result<ReportContext, ReportError> {
        let nearest = self.resolve_station(coordinate)?;
        let ranking = self
            .ranking
            .top_crimes(
                &nearest.station.name,
                &nearest.station.division_code,
                self.ranking_limit,
            )
            .await;

        Ok(ReportContext { nearest, ranking })
    }

    /// Runs a full report attempt.
    ///
    /// Steps run strictly in order and the first failure ends the
    /// attempt. The submission endpoint is only called once location,
    /// identity and station have all been resolved.
    ///
    /// # Errors
    ///
    /// * [`ReportError::NeedsManualLocation`] if the coordinate or location
    ///   name is missing, or the name is [`UNKNOWN_LOCATION`]
    /// * [`ReportError::Unauthenticated`] if there is no credential or the
    ///   backend rejects it
    /// * [`ReportError::StationResolutionFailed`] if no station resolves
    /// * [`ReportError::SubmissionFailed`] if the backend rejects the report
    /// * [`ReportError::Timeout`] if identity or submission exceed the
    ///   step timeout
    pub async fn submit(
        &self,
        token: Option<&BearerToken>,
        request: &ReportRequest,
    ) -> Result<SubmittedReport, ReportError> {
        let result = self.run(token, request).await;
        match &result {
            Ok(submitted) => log::info!(
                "Report submitted: {} at {} filed with {}",
                submitted.report.crime_type,
                submitted.report.location_name,
                submitted.report.police_station_name
            ),
            Err(e) => log::error!("Report attempt ended at {}: {e}", e.step()),
        }
        result
    }

    async fn run(
        &self,
        token: Option<&BearerToken>,
        request: &ReportRequest,
    ) -> Result<SubmittedReport, ReportError> {
        log::debug!("Report step: {}", ReportStep::ValidateLocation);
        let (location_name, coordinate) = validate_location(request)?;

        log::debug!("Report step: {}", ReportStep::ResolveIdentity);
        let token = token.ok_or(ReportError::Unauthenticated { detail: None })?;
        let reporter_email = self.resolve_identity(token).await?;

        log::debug!("Report step: {}", ReportStep::ResolveStation);
        let station = self.resolve_station(coordinate)?;

        let mut report = CrimeReport {
            crime_type: request.crime_type,
            location_name,
            coordinate,
            reporter_email,
            police_station_name: station.station.name.clone(),
            created_at: None,
        };

        log::debug!("Report step: {}", ReportStep::Submit);
        let submission = report.to_submission();
        let acknowledgement = self
            .bounded(
                ReportStep::Submit,
                self.reports.submit_report(token, &submission),
            )
            .await?
            .map_err(|e| match e {
                ApiError::Timeout => ReportError::Timeout {
                    step: ReportStep::Submit,
                },
                other => ReportError::SubmissionFailed {
                    message: other
                        .detail()
                        .map_or_else(|| GENERIC_SUBMISSION_FAILURE.to_string(), str::to_string),
                },
            })?;

        report.created_at = acknowledgement.created_at_utc();

        Ok(SubmittedReport {
            report,
            station,
            acknowledgement,
        })
    }

    /// Lists reports previously filed by the credential's owner.
    ///
    /// # Errors
    ///
    /// * [`ReportError::Unauthenticated`] if there is no credential or the
    ///   backend rejects it
    /// * [`ReportError::Timeout`] if the lookup exceeds the step timeout
    /// * [`ReportError::HistoryUnavailable`] for any other failure
    pub async fn history(
        &self,
        token: Option<&BearerToken>,
    ) -> Result<Vec<HistoryEntry>, ReportError> {
        let token = token.ok_or(ReportError::Unauthenticated { detail: None })?;

        self.bounded(ReportStep::FetchHistory, self.reports.history(token))
            .await?
            .map_err(|e| match e {
                ApiError::Timeout => ReportError::Timeout {
                    step: ReportStep::FetchHistory,
                },
                ApiError::Unauthorized { detail } => ReportError::Unauthenticated { detail },
                other => ReportError::HistoryUnavailable {
                    message: other.to_string(),
                },
            })
    }

    async fn resolve_identity(&self, token: &BearerToken) -> Result<String, ReportError> {
        let email = self
            .bounded(ReportStep::ResolveIdentity, self.identity.current_email(token))
            .await?
            .map_err(|e| match e {
                ApiError::Timeout => ReportError::Timeout {
                    step: ReportStep::ResolveIdentity,
                },
                ApiError::Unauthorized { detail } => ReportError::Unauthenticated { detail },
                other => ReportError::Unauthenticated {
                    detail: Some(other.to_string()),
                },
            })?;

        let email = email.trim();
        if email.is_empty() {
            return Err(ReportError::Unauthenticated {
                detail: Some("identity service returned no email".to_string()),
            });
        }

        Ok(email.to_string())
    }

    fn resolve_station(&self, coordinate: Coordinate) -> Result<NearestStationResult, ReportError> {
        Ok(self.locator.nearest(coordinate)?)
    }

    /// Runs `fut` under the step timeout.
    async fn bounded<T>(
        &self,
        step: ReportStep,
        fut: impl Future<Output = T> + Send,
    ) -> Result<T, ReportError> {
        tokio::time::timeout(self.step_timeout, fut)
            .await
            .map_err(|_| ReportError::Timeout { step })
    }
}

/// Checks that the request carries a usable location.
fn validate_location(request: &ReportRequest) -> Result<(String, Coordinate), ReportError> {
    let coordinate = request.coordinate.ok_or(ReportError::NeedsManualLocation)?;
    let name = request
        .location_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty() && *name != UNKNOWN_LOCATION)
        .ok_or(ReportError::NeedsManualLocation)?;

    Ok((name.to_string(), coordinate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crime_report_api::models::ReportSubmission;
    use crime_report_ranking::{RankingError, RankingSource};
    use crime_report_station::{PoliceStation, StationCatalog, StationError};

    #[derive(Clone, Copy)]
    enum IdentityBehavior {
        Email(&'static str),
        Rejected,
        ServerError,
        Hang,
    }

    struct FakeIdentity {
        behavior: IdentityBehavior,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl IdentityService for FakeIdentity {
        async fn current_email(&self, _token: &BearerToken) -> Result<String, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                IdentityBehavior::Email(email) => Ok(email.to_string()),
                IdentityBehavior::Rejected => Err(ApiError::Unauthorized {
                    detail: Some("Token has expired".to_string()),
                }),
                IdentityBehavior::ServerError => Err(ApiError::Status {
                    status: 500,
                    detail: None,
                }),
                IdentityBehavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(String::new())
                }
            }
        }
    }

    #[derive(Clone, Copy)]
    enum SubmitBehavior {
        Accept,
        RejectWithDetail(&'static str),
        RejectWithoutDetail,
        Hang,
    }

    struct FakeReports {
        behavior: SubmitBehavior,
        submit_calls: AtomicUsize,
        history_calls: AtomicUsize,
        last: Mutex<Option<ReportSubmission>>,
    }

    #[async_trait::async_trait]
    impl ReportService for FakeReports {
        async fn submit_report(
            &self,
            _token: &BearerToken,
            report: &ReportSubmission,
        ) -> Result<SubmissionAck, ApiError> {
            self.submit_calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(report.clone());
            match self.behavior {
                SubmitBehavior::Accept => Ok(SubmissionAck {
                    msg: Some("Report submitted successfully".to_string()),
                    id: Some(42),
                    created_at: Some("2025-03-01 10:15:00".to_string()),
                }),
                SubmitBehavior::RejectWithDetail(detail) => Err(ApiError::Status {
                    status: 400,
                    detail: Some(detail.to_string()),
                }),
                SubmitBehavior::RejectWithoutDetail => Err(ApiError::Status {
                    status: 502,
                    detail: None,
                }),
                SubmitBehavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(SubmissionAck::default())
                }
            }
        }

        async fn history(&self, _token: &BearerToken) -> Result<Vec<HistoryEntry>, ApiError> {
            self.history_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![HistoryEntry {
                crime_type: "Robbery".to_string(),
                location: "Bugis".to_string(),
                created_at: "2025-03-01 10:15:00".to_string(),
            }])
        }
    }

    struct FakeRanking {
        names: Vec<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl RankingSource for FakeRanking {
        async fn ranked_crime_types(
            &self,
            _station_name: &str,
            _division_code: &str,
            _limit: usize,
        ) -> Result<Vec<String>, RankingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.names.is_empty() {
                return Err(RankingError::Unavailable {
                    message: "unreachable".to_string(),
                });
            }
            Ok(self.names.iter().map(ToString::to_string).collect())
        }
    }

    struct Harness {
        coordinator: ReportCoordinator,
        identity: Arc<FakeIdentity>,
        reports: Arc<FakeReports>,
        ranking: Arc<FakeRanking>,
    }

    fn station(name: &str, latitude: f64, longitude: f64) -> PoliceStation {
        PoliceStation {
            name: name.to_string(),
            station_type: "Neighbourhood Police Centre".to_string(),
            telephone: "6000 0000".to_string(),
            division_code: "D01".to_string(),
            coordinate: Coordinate {
                latitude,
                longitude,
            },
        }
    }

    fn two_stations() -> Vec<PoliceStation> {
        vec![
            station("S1", 1.3001, 103.8001),
            station("S2", 1.3500, 103.9000),
        ]
    }

    fn harness(
        stations: Vec<PoliceStation>,
        identity: IdentityBehavior,
        submit: SubmitBehavior,
        ranked: Vec<&'static str>,
    ) -> Harness {
        let identity = Arc::new(FakeIdentity {
            behavior: identity,
            calls: AtomicUsize::new(0),
        });
        let reports = Arc::new(FakeReports {
            behavior: submit,
            submit_calls: AtomicUsize::new(0),
            history_calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        });
        let ranking = Arc::new(FakeRanking {
            names: ranked,
            calls: AtomicUsize::new(0),
        });

        let locator = Arc::new(StationLocator::new(Arc::new(StationCatalog::new(stations))));
        let coordinator = ReportCoordinator::new(
            locator,
            CrimeRankingClient::new(ranking.clone()),
            identity.clone(),
            reports.clone(),
        )
        .with_step_timeout(Duration::from_secs(3));

        Harness {
            coordinator,
            identity,
            reports,
            ranking,
        }
    }

    fn token() -> BearerToken {
        BearerToken::new("token").unwrap()
    }

    fn request(location_name: Option<&str>, coordinate: Option<Coordinate>) -> ReportRequest {
        ReportRequest {
            crime_type: CrimeTypeId::Robbery,
            location_name: location_name.map(ToString::to_string),
            coordinate,
        }
    }

    const QUERY: Coordinate = Coordinate {
        latitude: 1.3000,
        longitude: 103.8000,
    };

    #[tokio::test]
    async fn successful_report_is_filed_with_nearest_station() {
        let h = harness(
            two_stations(),
            IdentityBehavior::Email("citizen@example.sg"),
            SubmitBehavior::Accept,
            Vec::new(),
        );

        let submitted = h
            .coordinator
            .submit(Some(&token()), &request(Some("Bugis"), Some(QUERY)))
            .await
            .unwrap();

        assert_eq!(submitted.station.station.name, "S1");
        assert_eq!(submitted.report.police_station_name, "S1");
        assert_eq!(submitted.report.reporter_email, "citizen@example.sg");
        assert!(submitted.report.created_at.is_some());
        assert_eq!(submitted.acknowledgement.id, Some(42));

        let sent = h.reports.last.lock().unwrap().clone().unwrap();
        assert_eq!(sent.police_station, submitted.station.station.name);
        assert_eq!(sent.crime_type, "Robbery");
        assert_eq!(sent.location, "Bugis");
        assert!((sent.latitude - 1.3).abs() < f64::EPSILON);
        assert_eq!(h.reports.submit_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_location_needs_manual_selection_without_network() {
        let h = harness(
            two_stations(),
            IdentityBehavior::Email("citizen@example.sg"),
            SubmitBehavior::Accept,
            Vec::new(),
        );

        let err = h
            .coordinator
            .submit(
                Some(&token()),
                &request(Some(UNKNOWN_LOCATION), Some(QUERY)),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::NeedsManualLocation));
        assert_eq!(h.identity.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.reports.submit_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_coordinate_or_name_needs_manual_selection() {
        let h = harness(
            two_stations(),
            IdentityBehavior::Email("citizen@example.sg"),
            SubmitBehavior::Accept,
            Vec::new(),
        );

        for req in [
            request(Some("Bugis"), None),
            request(None, Some(QUERY)),
            request(Some("   "), Some(QUERY)),
        ] {
            let err = h
                .coordinator
                .submit(Some(&token()), &req)
                .await
                .unwrap_err();
            assert!(matches!(err, ReportError::NeedsManualLocation));
        }
        assert_eq!(h.identity.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_token_short_circuits_before_any_call() {
        let h = harness(
            two_stations(),
            IdentityBehavior::Email("citizen@example.sg"),
            SubmitBehavior::Accept,
            Vec::new(),
        );

        let err = h
            .coordinator
            .submit(None, &request(Some("Bugis"), Some(QUERY)))
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::Unauthenticated { detail: None }));
        assert_eq!(h.identity.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.reports.submit_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejected_identity_never_submits() {
        for behavior in [
            IdentityBehavior::Rejected,
            IdentityBehavior::ServerError,
            IdentityBehavior::Email("  "),
        ] {
            let h = harness(two_stations(), behavior, SubmitBehavior::Accept, Vec::new());

            let err = h
                .coordinator
                .submit(Some(&token()), &request(Some("Bugis"), Some(QUERY)))
                .await
                .unwrap_err();

            assert!(matches!(err, ReportError::Unauthenticated { .. }));
            assert_eq!(h.identity.calls.load(Ordering::SeqCst), 1);
            assert_eq!(h.reports.submit_calls.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn station_failure_never_submits() {
        let h = harness(
            Vec::new(),
            IdentityBehavior::Email("citizen@example.sg"),
            SubmitBehavior::Accept,
            Vec::new(),
        );

        let err = h
            .coordinator
            .submit(Some(&token()), &request(Some("Bugis"), Some(QUERY)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ReportError::StationResolutionFailed(StationError::NoStationsAvailable)
        ));
        assert_eq!(h.reports.submit_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_coordinate_fails_station_resolution() {
        let h = harness(
            two_stations(),
            IdentityBehavior::Email("citizen@example.sg"),
            SubmitBehavior::Accept,
            Vec::new(),
        );
        let bad = Coordinate {
            latitude: 95.0,
            longitude: 103.8,
        };

        let err = h
            .coordinator
            .submit(Some(&token()), &request(Some("Bugis"), Some(bad)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ReportError::StationResolutionFailed(StationError::InvalidCoordinate(_))
        ));
        assert_eq!(h.reports.submit_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn server_detail_is_surfaced_verbatim() {
        let h = harness(
            two_stations(),
            IdentityBehavior::Email("citizen@example.sg"),
            SubmitBehavior::RejectWithDetail("Database error: duplicate report"),
            Vec::new(),
        );

        let err = h
            .coordinator
            .submit(Some(&token()), &request(Some("Bugis"), Some(QUERY)))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Database error: duplicate report");
        assert_eq!(err.step(), ReportStep::Submit);
    }

    #[tokio::test]
    async fn missing_detail_uses_generic_message() {
        let h = harness(
            two_stations(),
            IdentityBehavior::Email("citizen@example.sg"),
            SubmitBehavior::RejectWithoutDetail,
            Vec::new(),
        );

        let err = h
            .coordinator
            .submit(Some(&token()), &request(Some("Bugis"), Some(QUERY)))
            .await
            .unwrap_err();

        assert!(matches!(
            &err,
            ReportError::SubmissionFailed { message } if message == GENERIC_SUBMISSION_FAILURE
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_identity_times_out() {
        let h = harness(
            two_stations(),
            IdentityBehavior::Hang,
            SubmitBehavior::Accept,
            Vec::new(),
        );

        let err = h
            .coordinator
            .submit(Some(&token()), &request(Some("Bugis"), Some(QUERY)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ReportError::Timeout {
                step: ReportStep::ResolveIdentity
            }
        ));
        assert_eq!(h.reports.submit_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_submission_times_out() {
        let h = harness(
            two_stations(),
            IdentityBehavior::Email("citizen@example.sg"),
            SubmitBehavior::Hang,
            Vec::new(),
        );

        let err = h
            .coordinator
            .submit(Some(&token()), &request(Some("Bugis"), Some(QUERY)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ReportError::Timeout {
                step: ReportStep::Submit
            }
        ));
        assert_eq!(h.reports.submit_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn prepare_resolves_station_then_ranking() {
        let h = harness(
            two_stations(),
            IdentityBehavior::Email("citizen@example.sg"),
            SubmitBehavior::Accept,
            vec!["Scam", "Robbery"],
        );

        let context = h.coordinator.prepare(QUERY).await.unwrap();
        assert_eq!(context.nearest.station.name, "S1");
        assert_eq!(context.ranking.station_name, "S1");
        assert_eq!(context.ranking.titles(), ["Scam", "Robbery", "Others"]);
        assert_eq!(h.ranking.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn prepare_falls_back_when_ranking_unreachable() {
        let h = harness(
            two_stations(),
            IdentityBehavior::Email("citizen@example.sg"),
            SubmitBehavior::Accept,
            Vec::new(),
        );

        let context = h.coordinator.prepare(QUERY).await.unwrap();
        assert!(context.ranking.is_fallback());
        assert_eq!(context.ranking.crime_types.len(), 4);
    }

    #[tokio::test]
    async fn prepare_skips_ranking_when_station_fails() {
        let h = harness(
            Vec::new(),
            IdentityBehavior::Email("citizen@example.sg"),
            SubmitBehavior::Accept,
            vec!["Scam"],
        );

        assert!(h.coordinator.prepare(QUERY).await.is_err());
        assert_eq!(h.ranking.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn history_requires_token() {
        let h = harness(
            two_stations(),
            IdentityBehavior::Email("citizen@example.sg"),
            SubmitBehavior::Accept,
            Vec::new(),
        );

        assert!(matches!(
            h.coordinator.history(None).await,
            Err(ReportError::Unauthenticated { detail: None })
        ));
        assert_eq!(h.reports.history_calls.load(Ordering::SeqCst), 0);

        let entries = h.coordinator.history(Some(&token())).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].crime_type, "Robbery");
        assert_eq!(h.reports.history_calls.load(Ordering::SeqCst), 1);
    }
}
