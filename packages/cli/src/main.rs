#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for crime report submission and station lookup.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use crime_report_api::{ApiClient, BearerToken};
use crime_report_coordinator::{ReportCoordinator, ReportError, ReportRequest};
use crime_report_crime_models::CrimeTypeId;
use crime_report_ranking::{CrimeRanking, CrimeRankingClient, HttpRankingSource};
use crime_report_station::{Coordinate, StationCatalog, StationLocator};

use crate::config::{AppConfig, TOKEN_ENV};

#[derive(Parser)]
#[command(name = "crime_report", about = "Crime report submission tool")]
struct Cli {
    /// TOML config file to use instead of the built-in defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all known police stations
    Stations,
    /// Show the police stations closest to a coordinate
    Nearest {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Number of stations to list
        #[arg(long, default_value = "1")]
        count: usize,
    },
    /// Show the nearest station and the crime types to offer there
    Prepare {
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
    /// Show the most reported crime types for a station
    TopCrimes {
        /// Station name as listed by `stations`
        #[arg(long)]
        station: String,
        /// Division code. Looked up from the station catalog if omitted.
        #[arg(long)]
        division: Option<String>,
        /// Number of crime types to show, including `Others`
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Submit a crime report filed with the nearest police station
    Report {
        /// Crime type title (e.g., "Snatch Theft")
        #[arg(long)]
        crime_type: String,
        /// Human-readable location name
        #[arg(long)]
        location: Option<String>,
        /// Latitude in decimal degrees
        #[arg(long, allow_hyphen_values = true, requires = "lon")]
        lat: Option<f64>,
        /// Longitude in decimal degrees
        #[arg(long, allow_hyphen_values = true, requires = "lat")]
        lon: Option<f64>,
    },
    /// List reports previously filed with the configured credential
    History,
}

#[allow(clippy::too_many_lines)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    let catalog = match &config.stations.path {
        Some(path) => StationCatalog::from_path(path, &config.stations.fields)?,
        None => StationCatalog::embedded()?,
    };
    let locator = Arc::new(
        StationLocator::new(Arc::new(catalog))
            .with_average_speed_kmh(config.travel.average_speed_kmh),
    );

    match cli.command {
        Commands::Stations => {
            let stations = locator.catalog().all_stations();
            println!("{:<45} {:<10} {:<12} LOCATION", "NAME", "DIVISION", "TELEPHONE");
            println!("{}", "-".repeat(90));
            for station in stations {
                println!(
                    "{:<45} {:<10} {:<12} {}",
                    station.name, station.division_code, station.telephone, station.coordinate
                );
            }
            println!("\n{} stations", stations.len());
        }
        Commands::Nearest { lat, lon, count } => {
            let coordinate = Coordinate::new(lat, lon)?;
            for (rank, result) in locator
                .nearest_n(coordinate, count.max(1))?
                .iter()
                .enumerate()
            {
                println!(
                    "{:>2}. {} ({}) - {}",
                    rank + 1,
                    result.station.name,
                    result.station.division_code,
                    result.summary()
                );
            }
        }
        Commands::Prepare { lat, lon } => {
            let coordinate = Coordinate::new(lat, lon)?;
            let coordinator = build_coordinator(&config, locator)?;
            match coordinator.prepare(coordinate).await {
                Ok(context) => {
                    println!("{}", context.nearest.station.name);
                    println!("{}", context.nearest.summary());
                    println!();
                    print_ranking(&context.ranking);
                }
                Err(e) => fail(&e),
            }
        }
        Commands::TopCrimes {
            station,
            division,
            limit,
        } => {
            let division = match division {
                Some(division) => division,
                None => locator
                    .catalog()
                    .find_by_name(&station)
                    .map(|s| s.division_code.clone())
                    .ok_or_else(|| format!("Unknown station {station:?}; pass --division"))?,
            };
            let ranking = ranking_client(&config, ApiClient::new(&config.api)?)
                .top_crimes(
                    &station,
                    &division,
                    limit.unwrap_or(config.ranking.limit),
                )
                .await;
            print_ranking(&ranking);
        }
        Commands::Report {
            crime_type,
            location,
            lat,
            lon,
        } => {
            let crime_type = CrimeTypeId::match_title(&crime_type).ok_or_else(|| {
                let known: Vec<&str> = CrimeTypeId::all().iter().map(|id| id.title()).collect();
                format!(
                    "Unknown crime type {crime_type:?}; expected one of: {}",
                    known.join(", ")
                )
            })?;
            let request = ReportRequest {
                crime_type,
                location_name: location,
                coordinate: lat.zip(lon).map(|(latitude, longitude)| Coordinate {
                    latitude,
                    longitude,
                }),
            };

            let token = BearerToken::from_env(TOKEN_ENV);
            let coordinator = build_coordinator(&config, locator)?;
            match coordinator.submit(token.as_ref(), &request).await {
                Ok(submitted) => {
                    println!(
                        "{}",
                        submitted
                            .acknowledgement
                            .msg
                            .as_deref()
                            .unwrap_or("Report submitted")
                    );
                    println!(
                        "Filed with {} ({})",
                        submitted.station.station.name,
                        submitted.station.summary()
                    );
                    if let Some(created_at) = submitted.report.created_at {
                        println!("Created at {}", created_at.to_rfc3339());
                    }
                }
                Err(e) => fail(&e),
            }
        }
        Commands::History => {
            let token = BearerToken::from_env(TOKEN_ENV);
            let coordinator = build_coordinator(&config, locator)?;
            match coordinator.history(token.as_ref()).await {
                Ok(entries) => {
                    println!("{:<26} {:<22} LOCATION", "CREATED", "CRIME TYPE");
                    println!("{}", "-".repeat(80));
                    for entry in &entries {
                        let created = entry
                            .created_at_utc()
                            .map_or_else(|| entry.created_at.clone(), |t| t.to_rfc3339());
                        println!("{created:<26} {:<22} {}", entry.crime_type, entry.location);
                    }
                    println!("\n{} reports", entries.len());
                }
                Err(e) => fail(&e),
            }
        }
    }

    Ok(())
}

fn ranking_client(config: &AppConfig, api: ApiClient) -> CrimeRankingClient {
    let source = HttpRankingSource::new(api, BearerToken::from_env(TOKEN_ENV));
    CrimeRankingClient::new(Arc::new(source)).with_timeout(config.api.timeout())
}

/// Wires the coordinator. Identity, submission and ranking all share one
/// [`ApiClient`] and its connection pool; nothing is sent until a
/// coordinator method is called.
fn build_coordinator(
    config: &AppConfig,
    locator: Arc<StationLocator>,
) -> Result<ReportCoordinator, crime_report_api::ApiError> {
    let api = ApiClient::new(&config.api)?;
    let ranking = ranking_client(config, api.clone());
    let api = Arc::new(api);

    Ok(ReportCoordinator::new(locator, ranking, api.clone(), api)
        .with_step_timeout(config.api.timeout())
        .with_ranking_limit(config.ranking.limit))
}

fn print_ranking(ranking: &CrimeRanking) {
    let heading = if ranking.is_fallback() {
        "Crime types (default)"
    } else {
        "Crime types"
    };
    println!(
        "{heading} for {} ({}):",
        ranking.station_name, ranking.division_code
    );
    for crime_type in ranking.crime_type_records() {
        println!("  [{}] {}", crime_type.display_color, crime_type.title);
    }
}

fn fail(error: &ReportError) -> ! {
    log::error!("{error}");
    eprintln!("{}", error.user_message());
    std::process::exit(1);
}
