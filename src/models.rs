//! Response payloads of the forecasting API.
//!
//! Every field is optional or defaulted: the API omits fields freely and a
//! partial payload should still render.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::metrics::FreshnessRecord;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthStatus {
    pub status: Option<String>,
    pub version: Option<String>,
    pub uptime_seconds: f64,
    pub timestamp: Option<String>,
    pub components: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FreshnessReport {
    pub sources: Vec<FreshnessRecord>,
    pub overall_quality_score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DataSourceInfo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub update_frequency: Option<String>,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DataSourceList {
    pub sources: Vec<DataSourceInfo>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DataLocation {
    pub code: Option<String>,
    pub name: Option<String>,
    pub region: Option<String>,
    pub source_count: u32,
    pub latest_data: Option<String>,
    /// Fraction in `[0, 1]`.
    pub data_completeness: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DataLocationList {
    pub locations: Vec<DataLocation>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineSummary {
    pub forecasts: ForecastCounts,
    pub data_quality: CompletenessInfo,
    pub models: ModelCounts,
    pub data_sources: SourceHealth,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ForecastCounts {
    pub total_generated: u64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CompletenessInfo {
    pub completeness_percent: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelCounts {
    pub active_models: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceHealth {
    pub healthy: u32,
    pub total: u32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct QualityReport {
    pub completeness: BTreeMap<String, f64>,
    pub timeliness: Timeliness,
    pub overall_quality_score: f64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Timeliness {
    pub on_schedule: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SurveillanceRecord {
    pub epiweek: Option<i64>,
    pub location: Option<String>,
    pub hospital_admissions: Option<f64>,
    /// Prediction interval, only on forecast records.
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
}

/// Surveillance endpoints return newest records first.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SurveillanceResponse {
    pub records: Vec<SurveillanceRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Forecast {
    pub forecast_date: Option<String>,
    pub target_date: Option<String>,
    pub location: Option<String>,
    pub horizon: Option<u32>,
    pub value: Option<f64>,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub model_ensemble: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ForecastResponse {
    pub forecasts: Vec<Forecast>,
}

/// One issue date of `/api/v1/forecasts/compare/{location}/{horizon}`.
/// Older API versions send `date` and `value` instead of `forecast_date`
/// and `ensemble_value`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ComparisonPoint {
    pub forecast_date: Option<String>,
    pub date: Option<String>,
    pub ensemble_value: Option<f64>,
    pub value: Option<f64>,
    /// Per-model predictions for the same target.
    pub models: BTreeMap<String, Option<f64>>,
}

impl ComparisonPoint {
    pub fn issued(&self) -> Option<&str> {
        self.forecast_date.as_deref().or(self.date.as_deref())
    }

    pub fn ensemble(&self) -> Option<f64> {
        self.ensemble_value.or(self.value)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ForecastComparison {
    pub comparison: Vec<ComparisonPoint>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelStatus {
    pub last_training_date: Option<String>,
    pub status: Option<String>,
    pub models: Vec<serde_json::Value>,
    pub duration_seconds: f64,
}

/// Free-form per-model metric rows; columns vary with the API version.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelComparison {
    pub models: Vec<serde_json::Map<String, serde_json::Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_payloads_decode() {
        let health: HealthStatus = serde_json::from_str(r#"{"status":"operational"}"#).unwrap();
        assert_eq!(health.status.as_deref(), Some("operational"));
        assert_eq!(health.uptime_seconds, 0.0);

        let summary: PipelineSummary = serde_json::from_str("{}").unwrap();
        assert_eq!(summary.data_sources.total, 0);
    }

    #[test]
    fn test_surveillance_record_decode() {
        let resp: SurveillanceResponse = serde_json::from_str(
            r#"{"records":[{"epiweek":202603,"location":"US","hospital_admissions":4210.0}]}"#,
        )
        .unwrap();
        assert_eq!(resp.records[0].epiweek, Some(202603));
        assert_eq!(resp.records[0].hospital_admissions, Some(4210.0));
    }

    #[test]
    fn test_comparison_point_field_fallbacks() {
        let resp: ForecastComparison = serde_json::from_str(
            r#"{"comparison":[
                {"forecast_date":"2026-01-05","ensemble_value":4100,"value":1,"models":{"arima":4000,"prophet":null}},
                {"date":"2026-01-12","value":4350}
            ]}"#,
        )
        .unwrap();

        let [first, second] = resp.comparison.as_slice() else {
            panic!("expected two comparison points");
        };
        assert_eq!(first.issued(), Some("2026-01-05"));
        assert_eq!(first.ensemble(), Some(4100.0));
        assert_eq!(first.models.get("prophet"), Some(&None));
        assert_eq!(second.issued(), Some("2026-01-12"));
        assert_eq!(second.ensemble(), Some(4350.0));
        assert!(second.models.is_empty());
    }

    #[test]
    fn test_surveillance_forecast_bounds_decode() {
        let record: SurveillanceRecord = serde_json::from_str(
            r#"{"epiweek":202605,"hospital_admissions":4600,"lower_bound":4100,"upper_bound":5200}"#,
        )
        .unwrap();
        assert_eq!(record.lower_bound, Some(4100.0));
        assert_eq!(record.upper_bound, Some(5200.0));
    }

    #[test]
    fn test_null_bounds_decode_as_none() {
        let f: Forecast =
            serde_json::from_str(r#"{"value":12.5,"lower_bound":null,"upper_bound":20}"#).unwrap();
        assert_eq!(f.lower_bound, None);
        assert_eq!(f.upper_bound, Some(20.0));
    }
}
