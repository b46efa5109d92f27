//! Landing page: system status, latest admissions, latest forecast and
//! pipeline figures.

use serde::Serialize;

use crate::epiweek::{NOT_AVAILABLE, epiweek_to_date};
use crate::metrics::format_admission_value;
use crate::metrics::quality::{FreshnessStatus, count_with_status, fresh_percent};
use crate::models::{Forecast, FreshnessReport, HealthStatus, PipelineSummary, SurveillanceRecord};
use crate::views::surveillance::latest_change;
use crate::views::{is_healthy, plain_value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStatus {
    pub api: String,
    pub version: String,
    pub database: String,
    pub data_freshness: String,
    pub fresh_percent: String,
    pub uptime: String,
}

pub fn system_status(health: &HealthStatus, freshness: &FreshnessReport) -> SystemStatus {
    let api = if health.status.as_deref() == Some("operational") {
        "🟢 Operational"
    } else {
        "🔴 Down"
    };

    let database = match health.components.get("database") {
        Some(status) if is_healthy(&plain_value(status)) => "🟢 Connected",
        _ => "🔴 Error",
    };

    let fresh = count_with_status(&freshness.sources, FreshnessStatus::Fresh);

    SystemStatus {
        api: api.to_string(),
        version: health.version.clone().unwrap_or_default(),
        database: database.to_string(),
        data_freshness: format!("{fresh}/{} Fresh", freshness.sources.len()),
        fresh_percent: format!("{}%", fresh_percent(&freshness.sources)),
        uptime: uptime_hours(health.uptime_seconds),
    }
}

/// Whole hours, or `< 1h` for a freshly started API.
fn uptime_hours(seconds: f64) -> String {
    let hours = (seconds.max(0.0) as i64) / 3_600;
    if hours > 0 {
        format!("{hours}h")
    } else {
        "< 1h".to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdmissionsSummary {
    pub latest_admissions: String,
    pub epiweek: String,
    pub week_start: String,
    pub change: String,
}

/// Summary of the newest surveillance record, if any.
pub fn admissions_summary(records: &[SurveillanceRecord]) -> Option<AdmissionsSummary> {
    let latest = records.first()?;

    Some(AdmissionsSummary {
        latest_admissions: format_admission_value(Some(latest.hospital_admissions.unwrap_or(0.0))),
        epiweek: latest
            .epiweek
            .map(|e| e.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        week_start: epiweek_to_date(latest.epiweek),
        change: latest_change(records)
            .map(|c| c.to_string())
            .unwrap_or_default(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSummary {
    pub forecast_date: String,
    pub predicted_value: String,
    pub confidence_range: String,
    pub model: String,
}

pub fn forecast_summary(forecasts: &[Forecast]) -> Option<ForecastSummary> {
    let f = forecasts.first()?;
    let lower = f.lower_bound.unwrap_or(0.0);
    let upper = f.upper_bound.unwrap_or(0.0);

    Some(ForecastSummary {
        forecast_date: f
            .forecast_date
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        predicted_value: format!("{:.0}", f.value.unwrap_or(0.0)),
        confidence_range: format!("{lower:.0} - {upper:.0}"),
        model: f
            .model_ensemble
            .clone()
            .unwrap_or_else(|| "ensemble".to_string()),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineStatus {
    pub forecasts_generated: u64,
    pub data_completeness: String,
    pub active_models: u32,
    pub data_sources: String,
}

pub fn pipeline_status(summary: &PipelineSummary) -> PipelineStatus {
    PipelineStatus {
        forecasts_generated: summary.forecasts.total_generated,
        data_completeness: format!("{:.1}%", summary.data_quality.completeness_percent),
        active_models: summary.models.active_models,
        data_sources: format!(
            "{}/{} Healthy",
            summary.data_sources.healthy, summary.data_sources.total
        ),
    }
}
