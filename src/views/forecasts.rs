//! Forecast tables.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::epiweek::NOT_AVAILABLE;
use crate::metrics::format::{forecast_model_color, format_confidence_interval};
use crate::metrics::format_number;
use crate::models::{Forecast, ForecastComparison};
use crate::views::{or_na, title_case};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub forecast_date: String,
    pub target_date: String,
    pub location: String,
    pub horizon: String,
    pub value: String,
    pub interval: String,
    pub model: String,
    pub color: String,
}

pub fn forecast_rows(forecasts: &[Forecast]) -> Vec<ForecastRow> {
    forecasts
        .iter()
        .map(|f| {
            let model = f
                .model_ensemble
                .clone()
                .unwrap_or_else(|| "ensemble".to_string());

            let interval = match (f.lower_bound, f.upper_bound) {
                (Some(lower), Some(upper)) => format_confidence_interval(lower, upper),
                _ => NOT_AVAILABLE.to_string(),
            };

            ForecastRow {
                forecast_date: or_na(f.forecast_date.as_deref()),
                target_date: or_na(f.target_date.as_deref()),
                location: or_na(f.location.as_deref()),
                horizon: f
                    .horizon
                    .map(|h| format!("{h}w"))
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                value: format_number(f.value, 0),
                interval,
                color: forecast_model_color(&model).to_string(),
                model,
            }
        })
        .collect()
}

/// How the forecast for one target moved across issue dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionRow {
    pub forecast_date: String,
    pub ensemble: String,
    /// One column per model, keyed by display name.
    #[serde(flatten)]
    pub models: BTreeMap<String, String>,
}

/// One row per issue date. Model columns are taken from the first point;
/// a model missing from a later point shows `N/A`.
pub fn evolution_rows(comparison: &ForecastComparison) -> Vec<EvolutionRow> {
    let names: Vec<&String> = comparison
        .comparison
        .first()
        .map(|p| p.models.keys().collect())
        .unwrap_or_default();

    comparison
        .comparison
        .iter()
        .map(|point| EvolutionRow {
            forecast_date: or_na(point.issued()),
            ensemble: format_number(point.ensemble(), 0),
            models: names
                .iter()
                .map(|name| {
                    let value = point.models.get(*name).copied().flatten();
                    (title_case(name), format_number(value, 0))
                })
                .collect(),
        })
        .collect()
}

/// Path of the API's CSV export for one location and horizon.
pub fn export_path(location: &str, horizon: u32) -> String {
    format!("/api/v1/forecasts/export/{location}/{horizon}")
}
