use anyhow::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::services::dashboard_api::DashboardApi;
use flu_dashboard::fetch::{HttpClient, endpoint_url, get_json};
use flu_dashboard::models::{
    DataLocationList, DataSourceList, ForecastComparison, ForecastResponse, FreshnessReport,
    HealthStatus, ModelComparison, ModelStatus, PipelineSummary, QualityReport,
    SurveillanceResponse,
};
use flu_dashboard::query::{ForecastQuery, ModelQuery, SurveillanceKind, SurveillanceQuery};

/// [`DashboardApi`] over HTTP, rooted at `base_url`.
pub struct RestDashboardClient<C> {
    http: C,
    base_url: String,
}

impl<C: HttpClient> RestDashboardClient<C> {
    pub fn new(http: C, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.to_string(),
        }
    }

    #[tracing::instrument(skip(self, params), fields(base_url = %self.base_url))]
    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let url = endpoint_url(&self.base_url, path, params)?;
        get_json(&self.http, url).await
    }
}

#[async_trait]
impl<C: HttpClient> DashboardApi for RestDashboardClient<C> {
    async fn health(&self) -> Result<HealthStatus> {
        self.get("/api/v1/health", &[]).await
    }

    async fn health_live(&self) -> Result<Value> {
        self.get("/api/v1/health/live", &[]).await
    }

    async fn health_ready(&self) -> Result<Value> {
        self.get("/api/v1/health/ready", &[]).await
    }

    async fn freshness(&self) -> Result<FreshnessReport> {
        self.get("/api/v1/data/freshness", &[]).await
    }

    async fn data_sources(&self) -> Result<DataSourceList> {
        self.get("/api/v1/data/sources", &[]).await
    }

    async fn data_locations(&self) -> Result<DataLocationList> {
        self.get("/api/v1/data/locations", &[]).await
    }

    async fn data_summary(&self) -> Result<PipelineSummary> {
        self.get("/api/v1/data/summary", &[]).await
    }

    async fn quality_report(&self) -> Result<QualityReport> {
        self.get("/api/v1/data/quality-report", &[]).await
    }

    async fn surveillance(
        &self,
        kind: SurveillanceKind,
        query: &SurveillanceQuery,
    ) -> Result<SurveillanceResponse> {
        self.get(kind.path(), &query.params()).await
    }

    async fn surveillance_locations(&self) -> Result<Value> {
        self.get("/api/v1/surveillance/locations", &[]).await
    }

    async fn surveillance_summary(&self, location: &str) -> Result<Value> {
        self.get(&format!("/api/v1/surveillance/summary/{location}"), &[])
            .await
    }

    async fn surveillance_by_location(
        &self,
        location: &str,
        days: u32,
    ) -> Result<SurveillanceResponse> {
        self.get(
            &format!("/api/v1/surveillance/by-location/{location}"),
            &[("days", days.to_string())],
        )
        .await
    }

    async fn latest_forecasts(&self, query: &ForecastQuery) -> Result<ForecastResponse> {
        self.get("/api/v1/forecasts/latest", &query.params()).await
    }

    async fn forecast_comparison(
        &self,
        location: &str,
        horizon: u32,
        days: u32,
    ) -> Result<ForecastComparison> {
        self.get(
            &format!("/api/v1/forecasts/compare/{location}/{horizon}"),
            &[("days", days.to_string())],
        )
        .await
    }

    async fn forecasts_by_location(&self, location: &str, days: u32) -> Result<ForecastResponse> {
        self.get(
            &format!("/api/v1/forecasts/by-location/{location}"),
            &[("days", days.to_string())],
        )
        .await
    }

    async fn forecasts_by_date(&self, forecast_date: &str) -> Result<ForecastResponse> {
        self.get(&format!("/api/v1/forecasts/by-date/{forecast_date}"), &[])
            .await
    }

    async fn forecast_models(&self) -> Result<Value> {
        self.get("/api/v1/forecasts/models", &[]).await
    }

    async fn forecast_locations(&self) -> Result<Value> {
        self.get("/api/v1/forecasts/locations", &[]).await
    }

    async fn model_status(&self) -> Result<ModelStatus> {
        self.get("/api/v1/models/status", &[]).await
    }

    async fn model_performance(&self, query: &ModelQuery) -> Result<Value> {
        self.get("/api/v1/models/performance", &query.params()).await
    }

    async fn model_comparison(&self, query: &ModelQuery) -> Result<ModelComparison> {
        self.get("/api/v1/models/comparison", &query.params()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flu_dashboard::fetch::BasicClient;
    use std::time::Duration;

    fn unreachable_client() -> RestDashboardClient<BasicClient> {
        let http = BasicClient::new(Duration::from_millis(200)).unwrap();
        RestDashboardClient::new(http, "http://127.0.0.1:9")
    }

    #[tokio::test]
    async fn test_unreachable_api_is_an_error() {
        let client = unreachable_client();
        assert!(client.health().await.is_err());
        assert!(
            client
                .surveillance(SurveillanceKind::Current, &SurveillanceQuery::default())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_an_error() {
        let http = BasicClient::new(Duration::from_secs(1)).unwrap();
        let client = RestDashboardClient::new(http, "localhost without scheme");
        let err = client.freshness().await.unwrap_err();
        assert!(err.to_string().contains("invalid API URL"));
    }
}
