//! Dashboard pages: fetch what a page needs and turn it into sections.
//!
//! A failed request never aborts the page. The section is logged and
//! marked unavailable and the remaining sections still render.

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::services::dashboard_api::DashboardApi;
use flu_dashboard::epiweek::{Epiweek, epiweek_to_date};
use flu_dashboard::output::{OutputFormat, append_records, print_section};
use flu_dashboard::query::{ForecastQuery, ModelQuery, SurveillanceKind, SurveillanceQuery};
use flu_dashboard::views::{forecasts, health, models, overview, quality, surveillance};

/// Rows fetched for the overview's admissions panel.
const OVERVIEW_ADMISSION_RECORDS: usize = 7;

#[derive(Debug, Default)]
pub struct Page {
    pub sections: Vec<(String, Option<Value>)>,
}

impl Page {
    fn add<T: Serialize>(&mut self, heading: &str, value: &T) -> Result<()> {
        self.sections
            .push((heading.to_string(), Some(serde_json::to_value(value)?)));
        Ok(())
    }

    fn unavailable(&mut self, heading: &str, err: &anyhow::Error) {
        error!(section = heading, error = %err, "API request failed");
        self.sections.push((heading.to_string(), None));
    }

    fn empty(&mut self, heading: &str) {
        info!(section = heading, "No data available");
        self.sections.push((heading.to_string(), None));
    }

    #[cfg(test)]
    pub fn get(&self, heading: &str) -> Option<&Value> {
        self.sections
            .iter()
            .find(|(h, _)| h == heading)
            .and_then(|(_, v)| v.as_ref())
    }

    pub fn emit(&self, format: OutputFormat) -> Result<()> {
        for (heading, value) in &self.sections {
            match value {
                Some(v) => print_section(heading, v, format)?,
                None => warn!(section = %heading, "Section unavailable"),
            }
        }
        Ok(())
    }
}

/// A failed export is logged; the page still renders.
fn export<T: Serialize>(csv: Option<&str>, rows: &[T]) {
    let Some(path) = csv else {
        return;
    };
    match append_records(path, rows) {
        Ok(()) => info!(path, rows = rows.len(), "Exported rows"),
        Err(e) => error!(path, error = %e, "CSV export failed"),
    }
}

pub async fn overview(api: &dyn DashboardApi, location: &str) -> Result<Page> {
    let mut page = Page::default();

    match (api.health().await, api.freshness().await) {
        (Ok(h), Ok(f)) => page.add("System Status", &overview::system_status(&h, &f))?,
        (Err(e), _) | (_, Err(e)) => page.unavailable("System Status", &e),
    }

    let query = SurveillanceQuery::for_location(location).limit(OVERVIEW_ADMISSION_RECORDS);
    let heading = format!("Hospital Admissions - {location}");
    match api.surveillance(SurveillanceKind::Current, &query).await {
        Ok(resp) => match overview::admissions_summary(&resp.records) {
            Some(summary) => page.add(&heading, &summary)?,
            None => page.empty(&heading),
        },
        Err(e) => page.unavailable(&heading, &e),
    }

    let query = ForecastQuery {
        location: location.to_string(),
        horizon: None,
        limit: 1,
    };
    let heading = format!("Latest Forecast - {location}");
    match api.latest_forecasts(&query).await {
        Ok(resp) => match overview::forecast_summary(&resp.forecasts) {
            Some(summary) => page.add(&heading, &summary)?,
            None => page.empty(&heading),
        },
        Err(e) => page.unavailable(&heading, &e),
    }

    match api.data_summary().await {
        Ok(summary) => page.add("Pipeline Status", &overview::pipeline_status(&summary))?,
        Err(e) => page.unavailable("Pipeline Status", &e),
    }

    Ok(page)
}

/// Where the surveillance page reads its records from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveillanceSource {
    /// One of the filtered surveillance endpoints.
    Endpoint(SurveillanceKind),
    /// Everything recorded for one location over the last `days`.
    ByLocation { location: String, days: u32 },
}

pub async fn surveillance(
    api: &dyn DashboardApi,
    source: &SurveillanceSource,
    query: &SurveillanceQuery,
    csv: Option<&str>,
) -> Result<Page> {
    let mut page = Page::default();

    let fetched = match source {
        SurveillanceSource::Endpoint(kind) => api.surveillance(*kind, query).await,
        SurveillanceSource::ByLocation { location, days } => {
            api.surveillance_by_location(location, *days).await
        }
    };

    match fetched {
        Ok(resp) if resp.records.is_empty() => page.empty("Surveillance"),
        Ok(resp) => {
            let rows = surveillance::surveillance_rows(&resp.records);
            export(csv, &rows);
            page.add("Surveillance", &rows)?;

            let series: Vec<(String, f64)> = surveillance::admission_series(&resp.records)
                .into_iter()
                .map(|(date, value)| (date.to_string(), value))
                .collect();
            page.add("Admissions Series", &series)?;
        }
        Err(e) => page.unavailable("Surveillance", &e),
    }

    if let Some(location) = &query.location {
        match api.surveillance_summary(location).await {
            Ok(summary) => page.add("Location Summary", &summary)?,
            Err(e) => page.unavailable("Location Summary", &e),
        }
    } else {
        match api.surveillance_locations().await {
            Ok(locations) => page.add("Locations", &locations)?,
            Err(e) => page.unavailable("Locations", &e),
        }
    }

    Ok(page)
}

/// Which forecasts the forecasts page lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastSelection {
    /// Newest forecasts for a location and horizon.
    Latest { limit: usize },
    /// Everything issued on one date.
    IssuedOn(String),
    /// A location's forecast history.
    History { days: u32 },
}

pub async fn forecasts(
    api: &dyn DashboardApi,
    location: &str,
    horizon: u32,
    days: u32,
    selection: &ForecastSelection,
    csv: Option<&str>,
) -> Result<Page> {
    let mut page = Page::default();

    let listed = match selection {
        ForecastSelection::Latest { limit } => {
            let query = ForecastQuery {
                location: location.to_string(),
                horizon: Some(horizon),
                limit: *limit,
            };
            api.latest_forecasts(&query).await
        }
        ForecastSelection::IssuedOn(date) => api.forecasts_by_date(date).await,
        ForecastSelection::History { days } => api.forecasts_by_location(location, *days).await,
    };

    let heading = format!("Forecasts for {location}");
    match listed {
        Ok(resp) if resp.forecasts.is_empty() => page.empty(&heading),
        Ok(resp) => {
            let rows = forecasts::forecast_rows(&resp.forecasts);
            export(csv, &rows);
            page.add(&heading, &rows)?;
        }
        Err(e) => page.unavailable(&heading, &e),
    }

    match api.forecast_comparison(location, horizon, days).await {
        Ok(resp) if resp.comparison.is_empty() => page.empty("Forecast Evolution"),
        Ok(resp) => page.add("Forecast Evolution", &forecasts::evolution_rows(&resp))?,
        Err(e) => page.unavailable("Forecast Evolution", &e),
    }

    page.add(
        "CSV Export Endpoint",
        &format!("{}?days={days}", forecasts::export_path(location, horizon)),
    )?;

    match api.forecast_models().await {
        Ok(models) => page.add("Available Models", &models)?,
        Err(e) => page.unavailable("Available Models", &e),
    }

    match api.forecast_locations().await {
        Ok(locations) => page.add("Available Locations", &locations)?,
        Err(e) => page.unavailable("Available Locations", &e),
    }

    Ok(page)
}

pub async fn models(api: &dyn DashboardApi, query: &ModelQuery) -> Result<Page> {
    let mut page = Page::default();

    match api.model_status().await {
        Ok(status) => page.add("Training Status", &models::training_status(&status))?,
        Err(e) => page.unavailable("Training Status", &e),
    }

    match api.model_performance(query).await {
        Ok(perf) => match perf.get("performance") {
            Some(p) if !p.is_null() => page.add("Performance Metrics", p)?,
            _ => page.empty("Performance Metrics"),
        },
        Err(e) => page.unavailable("Performance Metrics", &e),
    }

    match api.model_comparison(query).await {
        Ok(c) if c.models.is_empty() => page.empty("Model Comparison"),
        Ok(c) => page.add("Model Comparison", &models::comparison_rows(&c))?,
        Err(e) => page.unavailable("Model Comparison", &e),
    }

    Ok(page)
}

pub async fn quality(api: &dyn DashboardApi, csv: Option<&str>) -> Result<Page> {
    let mut page = Page::default();

    let freshness = api.freshness().await;
    match &freshness {
        Ok(f) if f.sources.is_empty() => page.empty("Data Freshness"),
        Ok(f) => {
            let rows = quality::freshness_rows(f);
            export(csv, &rows);
            page.add("Data Freshness", &rows)?;
            page.add("Freshness Distribution", &quality::status_distribution(f))?;

            let attention: Vec<String> = quality::attention_needed(f)
                .into_iter()
                .map(|(name, color)| format!("{} {name}", color.marker()))
                .collect();
            if !attention.is_empty() {
                page.add("Needs Attention", &attention)?;
            }
        }
        Err(e) => page.unavailable("Data Freshness", e),
    }

    match api.data_sources().await {
        Ok(s) if s.sources.is_empty() => page.empty("Configured Data Sources"),
        Ok(s) => page.add("Configured Data Sources", &quality::data_source_rows(&s.sources))?,
        Err(e) => page.unavailable("Configured Data Sources", &e),
    }

    let report = api.quality_report().await;
    if let Err(e) = &report {
        error!(error = %e, "Quality report request failed");
    }

    page.add(
        "Data Quality Metrics",
        &quality::quality_summary(freshness.as_ref().ok(), report.as_ref().ok()),
    )?;

    Ok(page)
}

pub async fn health(api: &dyn DashboardApi) -> Result<Page> {
    let mut page = Page::default();

    match api.health().await {
        Ok(h) => {
            page.add("Component Status", &health::component_rows(&h))?;
            page.add("API Information", &health::api_info(&h))?;
        }
        Err(e) => page.unavailable("Component Status", &e),
    }

    let probes = [
        ("Liveness", api.health_live().await),
        ("Readiness", api.health_ready().await),
    ];
    for (heading, probe) in probes {
        match probe {
            Ok(v) => page.add(heading, &v)?,
            Err(e) => page.unavailable(heading, &e),
        }
    }

    match api.data_locations().await {
        Ok(l) if l.locations.is_empty() => page.empty("Locations with Available Data"),
        Ok(l) => {
            let (rows, total) = health::location_rows(&l.locations);
            if total > rows.len() {
                info!(shown = rows.len(), total, "Location list truncated");
            }
            page.add("Locations with Available Data", &rows)?;
        }
        Err(e) => page.unavailable("Locations with Available Data", &e),
    }

    Ok(page)
}

#[derive(Debug, Serialize)]
struct EpiweekRow {
    epiweek: i64,
    year: Option<i32>,
    week: Option<u32>,
    week_start: String,
}

/// Offline conversion of epiweek codes.
pub fn epiweeks(codes: &[i64]) -> Result<Page> {
    let rows: Vec<EpiweekRow> = codes
        .iter()
        .map(|&code| {
            let parsed = Epiweek::from_code(code);
            EpiweekRow {
                epiweek: code,
                year: parsed.map(|e| e.year),
                week: parsed.map(|e| e.week),
                week_start: epiweek_to_date(Some(code)),
            }
        })
        .collect();

    let mut page = Page::default();
    page.add("Epiweeks", &rows)?;
    Ok(page)
}
