//! CLI entry point for the flu forecasting dashboard.
//!
//! Each subcommand renders one dashboard page from the pipeline's REST API.
//! With `AUTO_REFRESH=true` the page is re-rendered every
//! `REFRESH_INTERVAL` seconds.

mod infra;
mod pages;
mod services;

use crate::infra::rest::RestDashboardClient;
use crate::pages::{ForecastSelection, Page, SurveillanceSource};
use crate::services::dashboard_api::DashboardApi;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand};
use flu_dashboard::config::{
    DATA_SOURCES, DEFAULT_HORIZON, DEFAULT_LOCATION, DEFAULT_LOOKBACK_DAYS, DEFAULT_LIMIT,
    DashboardConfig, LOCATIONS, MODELS,
};
use flu_dashboard::fetch::BasicClient;
use flu_dashboard::output::OutputFormat;
use flu_dashboard::query::{ModelQuery, SurveillanceKind, SurveillanceQuery};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "flu_dashboard")]
#[command(about = "Terminal dashboard for the flu forecasting pipeline", long_about = None)]
struct Cli {
    /// How page sections are printed
    #[arg(short, long, value_enum, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// CSV file to append the page's main table to
    #[arg(long, global = true)]
    csv: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// System status, latest admissions, latest forecast and pipeline summary
    Overview {
        #[arg(short, long, default_value = DEFAULT_LOCATION, value_parser = PossibleValuesParser::new(LOCATIONS.iter().copied()))]
        location: String,
    },
    /// Surveillance records with epiweeks converted to dates
    Surveillance {
        #[arg(short, long, value_enum, default_value_t = SurveillanceKind::Current)]
        kind: SurveillanceKind,

        #[arg(short, long, value_parser = PossibleValuesParser::new(LOCATIONS.iter().copied()))]
        location: Option<String>,

        /// Maximum number of records
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Only records from the last N days
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=3650))]
        days: Option<u32>,

        /// Only records from this date on (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Read every record of --location over --days instead of one endpoint
        #[arg(long, requires = "location", conflicts_with_all = ["kind", "limit", "start_date"])]
        by_location: bool,
    },
    /// Forecast tables for a location and horizon
    Forecasts {
        #[arg(short, long, default_value = DEFAULT_LOCATION, value_parser = PossibleValuesParser::new(LOCATIONS.iter().copied()))]
        location: String,

        /// Weeks ahead
        #[arg(short = 'H', long, default_value_t = DEFAULT_HORIZON, value_parser = clap::value_parser!(u32).range(1..=8))]
        horizon: u32,

        /// Number of latest forecasts to list
        #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,

        /// Look-back window for the forecast evolution table
        #[arg(short, long, default_value_t = DEFAULT_LOOKBACK_DAYS, value_parser = clap::value_parser!(u32).range(1..=365))]
        days: u32,

        /// List forecasts issued on this date (YYYY-MM-DD) instead
        #[arg(long, conflicts_with = "history_days")]
        date: Option<String>,

        /// List the location's forecast history over N days instead
        #[arg(long)]
        history_days: Option<u32>,
    },
    /// Training status, performance and model comparison
    Models {
        #[arg(short, long, default_value = DEFAULT_LOCATION, value_parser = PossibleValuesParser::new(LOCATIONS.iter().copied()))]
        location: String,

        #[arg(short = 'H', long, default_value_t = DEFAULT_HORIZON, value_parser = clap::value_parser!(u32).range(1..=8))]
        horizon: u32,

        #[arg(short, long, default_value_t = 30)]
        days: u32,
    },
    /// Data freshness, configured sources and quality score
    Quality,
    /// API components, probes and locations with data
    Health,
    /// Convert epiweek codes (YYYYWW) to the date of their Sunday
    Epiweek {
        #[arg(value_name = "YYYYWW", required = true, allow_negative_numbers = true)]
        codes: Vec<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = DashboardConfig::from_env()?;
    let _file_guard = init_logging(&config)?;

    let cli = Cli::parse();

    info!(
        api_base_url = %config.api_base_url,
        locations = LOCATIONS.len(),
        models = MODELS.len(),
        data_sources = DATA_SOURCES.len(),
        "Dashboard configuration"
    );

    let http = BasicClient::new(config.api_timeout)?;
    let api = RestDashboardClient::new(http, &config.api_base_url);

    let offline = matches!(cli.command, Commands::Epiweek { .. });

    loop {
        let page = render(&cli, &api).await?;
        page.emit(cli.format)?;

        if offline || !config.auto_refresh {
            break;
        }

        info!(
            refresh_secs = config.refresh_interval.as_secs(),
            "Waiting before next refresh"
        );
        tokio::time::sleep(config.refresh_interval).await;
    }

    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_logging(config: &DashboardConfig) -> Result<WorkerGuard> {
    let log_path = Path::new(&config.log_file_path);
    let log_dir = log_path.parent().unwrap_or(Path::new("logs"));
    let log_file_name = log_path
        .file_name()
        .unwrap_or(OsStr::new("flu_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_filter = match EnvFilter::try_from_env("RUST_LOG") {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid LOG_LEVEL '{}'", config.log_level))?,
    };

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(stderr_filter);

    let json_filter =
        EnvFilter::try_from_env("RUST_LOG_JSON").unwrap_or_else(|_| EnvFilter::new("debug"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(json_filter);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(file_guard)
}

#[tracing::instrument(skip_all)]
async fn render(cli: &Cli, api: &dyn DashboardApi) -> Result<Page> {
    let csv = cli.csv.as_deref();

    match &cli.command {
        Commands::Overview { location } => pages::overview(api, location).await,
        Commands::Surveillance {
            kind,
            location,
            limit,
            days,
            start_date,
            by_location,
        } => {
            let query = SurveillanceQuery {
                location: location.clone(),
                limit: *limit,
                days: *days,
                start_date: *start_date,
            };
            let source = match (by_location, location) {
                (true, Some(location)) => SurveillanceSource::ByLocation {
                    location: location.clone(),
                    days: days.unwrap_or(DEFAULT_LOOKBACK_DAYS),
                },
                _ => SurveillanceSource::Endpoint(*kind),
            };
            pages::surveillance(api, &source, &query, csv).await
        }
        Commands::Forecasts {
            location,
            horizon,
            limit,
            days,
            date,
            history_days,
        } => {
            let selection = match (date, history_days) {
                (Some(date), _) => ForecastSelection::IssuedOn(date.clone()),
                (None, Some(days)) => ForecastSelection::History { days: *days },
                (None, None) => ForecastSelection::Latest { limit: *limit },
            };
            pages::forecasts(api, location, *horizon, *days, &selection, csv).await
        }
        Commands::Models {
            location,
            horizon,
            days,
        } => {
            let query = ModelQuery {
                location: location.clone(),
                horizon: Some(*horizon),
                days: *days,
            };
            pages::models(api, &query).await
        }
        Commands::Quality => pages::quality(api, csv).await,
        Commands::Health => pages::health(api).await,
        Commands::Epiweek { codes } => pages::epiweeks(codes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_surveillance_args() {
        let cli = Cli::try_parse_from([
            "flu_dashboard",
            "surveillance",
            "--kind",
            "merged",
            "-l",
            "hhs2",
            "-n",
            "52",
        ])
        .unwrap();

        match cli.command {
            Commands::Surveillance {
                kind,
                location,
                limit,
                days,
                start_date,
                by_location,
            } => {
                assert_eq!(kind, SurveillanceKind::Merged);
                assert_eq!(location.as_deref(), Some("hhs2"));
                assert_eq!(limit, Some(52));
                assert_eq!(days, None);
                assert_eq!(start_date, None);
                assert!(!by_location);
            }
            _ => panic!("expected surveillance subcommand"),
        }
    }

    #[test]
    fn test_parse_start_date() {
        let cli = Cli::try_parse_from([
            "flu_dashboard",
            "surveillance",
            "--kind",
            "forecast",
            "--start-date",
            "2025-10-05",
        ])
        .unwrap();

        match cli.command {
            Commands::Surveillance { start_date, .. } => {
                assert_eq!(start_date, NaiveDate::from_ymd_opt(2025, 10, 5));
            }
            _ => panic!("expected surveillance subcommand"),
        }

        assert!(
            Cli::try_parse_from(["flu_dashboard", "surveillance", "--start-date", "10/05/2025"])
                .is_err()
        );
    }

    #[test]
    fn test_by_location_needs_location() {
        assert!(Cli::try_parse_from(["flu_dashboard", "surveillance", "--by-location"]).is_err());

        let cli = Cli::try_parse_from([
            "flu_dashboard",
            "surveillance",
            "--by-location",
            "-l",
            "hhs5",
            "-d",
            "30",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Surveillance {
                by_location: true,
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_location_rejected() {
        assert!(Cli::try_parse_from(["flu_dashboard", "overview", "-l", "mars"]).is_err());
    }

    #[test]
    fn test_horizon_range() {
        assert!(Cli::try_parse_from(["flu_dashboard", "forecasts", "-H", "9"]).is_err());
        assert!(Cli::try_parse_from(["flu_dashboard", "forecasts", "-H", "8"]).is_ok());
    }

    #[test]
    fn test_epiweek_codes_and_global_flags() {
        let cli = Cli::try_parse_from([
            "flu_dashboard",
            "epiweek",
            "202603",
            "-1",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::Epiweek { codes } => assert_eq!(codes, vec![202603, -1]),
            _ => panic!("expected epiweek subcommand"),
        }
    }
}
