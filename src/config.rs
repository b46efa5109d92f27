//! Dashboard settings and the static catalogue of locations, models and
//! data sources.

use anyhow::{Context, Result};
use std::time::Duration;

pub const LOCATIONS: &[&str] = &[
    "US", "hhs1", "hhs2", "hhs3", "hhs4", "hhs5", "hhs6", "hhs7", "hhs8", "hhs9", "hhs10",
];

pub const MODELS: &[&str] = &["baseline", "arima", "prophet", "xgboost", "lightgbm", "ensemble"];

pub const DATA_SOURCES: &[&str] = &[
    "Hospital Admissions",
    "ILINet",
    "Clinical Lab",
    "FluSurv-NET",
    "Mortality Data",
    "State Activity",
    "FluSight Targets",
];

pub const COLOR_FRESH: &str = "#2ecc71";
pub const COLOR_STALE: &str = "#f39c12";
pub const COLOR_MISSING: &str = "#e74c3c";
pub const COLOR_PRIMARY: &str = "#1f77b4";

pub static MODEL_COLORS: &[(&str, &str)] = &[
    ("baseline", "#808080"),
    ("arima", "#1f77b4"),
    ("prophet", "#ff7f0e"),
    ("xgboost", "#2ca02c"),
    ("lightgbm", "#d62728"),
    ("ensemble", "#9467bd"),
];

pub const DEFAULT_LOCATION: &str = "US";
pub const DEFAULT_HORIZON: u32 = 4;
pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;
pub const DEFAULT_LIMIT: usize = 10;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REFRESH_SECS: u64 = 300;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_FILE: &str = "logs/flu_dashboard.log";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub api_timeout: Duration,
    pub auto_refresh: bool,
    pub refresh_interval: Duration,
    pub log_level: String,
    pub log_file_path: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            api_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auto_refresh: false,
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file_path: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Reads settings from the process environment, after loading `.env`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Unset variables
    /// take their defaults; malformed numbers are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_timeout = match lookup("API_TIMEOUT") {
            Some(v) => Duration::from_secs(parse_secs("API_TIMEOUT", &v)?),
            None => defaults.api_timeout,
        };

        let refresh_interval = match lookup("REFRESH_INTERVAL") {
            Some(v) => Duration::from_secs(parse_secs("REFRESH_INTERVAL", &v)?),
            None => defaults.refresh_interval,
        };

        let auto_refresh = lookup("AUTO_REFRESH")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(defaults.auto_refresh);

        Ok(Self {
            api_base_url: lookup("API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            api_timeout,
            auto_refresh,
            refresh_interval,
            log_level: lookup("LOG_LEVEL")
                .map(|v| v.to_lowercase())
                .unwrap_or(defaults.log_level),
            log_file_path: lookup("LOG_FILE_PATH").unwrap_or(defaults.log_file_path),
        })
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a whole number of seconds, got '{value}'"))
}
