//! Endpoint paths and query parameters for the dashboard API.

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;

pub type QueryParams = Vec<(&'static str, String)>;

/// Which slice of surveillance data to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveillanceKind {
    /// Recent weeks, refreshed daily
    Current,
    /// Multi-season history
    Historical,
    /// Projected weeks ahead
    Forecast,
    /// Historical, current and forecast combined
    Merged,
}

impl SurveillanceKind {
    pub fn path(&self) -> &'static str {
        match self {
            SurveillanceKind::Current => "/api/v1/surveillance/current",
            SurveillanceKind::Historical => "/api/v1/surveillance/historical",
            SurveillanceKind::Forecast => "/api/v1/surveillance/forecasts",
            SurveillanceKind::Merged => "/api/v1/surveillance/merged",
        }
    }
}

/// Filters shared by every surveillance endpoint. Unset fields are left
/// off the query string so the API applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveillanceQuery {
    pub location: Option<String>,
    pub limit: Option<usize>,
    pub days: Option<u32>,
    /// Earliest week to return.
    pub start_date: Option<NaiveDate>,
}

impl SurveillanceQuery {
    pub fn for_location(location: &str) -> Self {
        Self {
            location: Some(location.to_string()),
            ..Default::default()
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn days(mut self, days: u32) -> Self {
        self.days = Some(days);
        self
    }

    pub fn start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn params(&self) -> QueryParams {
        let mut params = Vec::new();
        if let Some(location) = &self.location {
            params.push(("location", location.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(days) = self.days {
            params.push(("days", days.to_string()));
        }
        if let Some(start_date) = self.start_date {
            params.push(("start_date", start_date.format("%Y-%m-%d").to_string()));
        }
        params
    }
}

/// Filters for `/api/v1/forecasts/latest`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastQuery {
    pub location: String,
    pub horizon: Option<u32>,
    pub limit: usize,
}

impl ForecastQuery {
    pub fn params(&self) -> QueryParams {
        let mut params = vec![("location", self.location.clone())];
        if let Some(horizon) = self.horizon {
            params.push(("horizon", horizon.to_string()));
        }
        params.push(("limit", self.limit.to_string()));
        params
    }
}

/// Location/horizon window used by the model performance endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelQuery {
    pub location: String,
    pub horizon: Option<u32>,
    pub days: u32,
}

impl ModelQuery {
    pub fn params(&self) -> QueryParams {
        let mut params = vec![("location", self.location.clone())];
        if let Some(horizon) = self.horizon {
            params.push(("horizon", horizon.to_string()));
        }
        params.push(("days", self.days.to_string()));
        params
    }
}
