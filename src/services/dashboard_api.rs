//! Trait describing every endpoint the dashboard pages consume.

use anyhow::Result;
use serde_json::Value;

use flu_dashboard::models::{
    DataLocationList, DataSourceList, ForecastComparison, ForecastResponse, FreshnessReport,
    HealthStatus, ModelComparison, ModelStatus, PipelineSummary, QualityReport,
    SurveillanceResponse,
};
use flu_dashboard::query::{ForecastQuery, ModelQuery, SurveillanceKind, SurveillanceQuery};

/// Abstraction over the forecasting pipeline's REST API.
///
/// Lookup-style endpoints whose shape the pages only pass through are
/// returned as raw JSON.
#[async_trait::async_trait]
pub trait DashboardApi: Send + Sync {
    async fn health(&self) -> Result<HealthStatus>;
    async fn health_live(&self) -> Result<Value>;
    async fn health_ready(&self) -> Result<Value>;

    async fn freshness(&self) -> Result<FreshnessReport>;
    async fn data_sources(&self) -> Result<DataSourceList>;
    async fn data_locations(&self) -> Result<DataLocationList>;
    async fn data_summary(&self) -> Result<PipelineSummary>;
    async fn quality_report(&self) -> Result<QualityReport>;

    /// Surveillance records of one kind, newest first.
    async fn surveillance(
        &self,
        kind: SurveillanceKind,
        query: &SurveillanceQuery,
    ) -> Result<SurveillanceResponse>;
    async fn surveillance_locations(&self) -> Result<Value>;
    async fn surveillance_summary(&self, location: &str) -> Result<Value>;
    /// All records for one location over the last `days`, newest first.
    async fn surveillance_by_location(
        &self,
        location: &str,
        days: u32,
    ) -> Result<SurveillanceResponse>;

    async fn latest_forecasts(&self, query: &ForecastQuery) -> Result<ForecastResponse>;
    /// How forecasts for one target evolved over the last `days`.
    async fn forecast_comparison(
        &self,
        location: &str,
        horizon: u32,
        days: u32,
    ) -> Result<ForecastComparison>;
    async fn forecasts_by_location(&self, location: &str, days: u32) -> Result<ForecastResponse>;
    async fn forecasts_by_date(&self, forecast_date: &str) -> Result<ForecastResponse>;
    async fn forecast_models(&self) -> Result<Value>;
    async fn forecast_locations(&self) -> Result<Value>;

    async fn model_status(&self) -> Result<ModelStatus>;
    async fn model_performance(&self, query: &ModelQuery) -> Result<Value>;
    async fn model_comparison(&self, query: &ModelQuery) -> Result<ModelComparison>;
}
