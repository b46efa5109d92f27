//! System health page.

use serde::Serialize;

use crate::metrics::format_uptime;
use crate::models::{DataLocation, HealthStatus};
use crate::views::{is_healthy, or_na, plain_value, title_case};

/// Location tables are cut off after this many rows.
pub const LOCATION_ROW_LIMIT: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRow {
    pub component: String,
    pub marker: String,
    pub status: String,
}

pub fn component_rows(health: &HealthStatus) -> Vec<ComponentRow> {
    health
        .components
        .iter()
        .map(|(name, value)| {
            let status = plain_value(value);
            let marker = if is_healthy(&status) { "🟢" } else { "🔴" };
            ComponentRow {
                component: title_case(name),
                marker: marker.to_string(),
                status,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiInfo {
    pub status: String,
    pub version: String,
    pub uptime: String,
    pub timestamp: String,
}

pub fn api_info(health: &HealthStatus) -> ApiInfo {
    ApiInfo {
        status: health.status.clone().unwrap_or_else(|| "Unknown".to_string()),
        version: health.version.clone().unwrap_or_else(|| "Unknown".to_string()),
        uptime: format_uptime(health.uptime_seconds as i64),
        timestamp: or_na(health.timestamp.as_deref()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRow {
    pub location: String,
    pub code: String,
    pub region: String,
    pub data_sources: u32,
    pub latest_data: String,
    pub completeness: String,
}

/// The first [`LOCATION_ROW_LIMIT`] locations, plus the total count.
pub fn location_rows(locations: &[DataLocation]) -> (Vec<LocationRow>, usize) {
    let rows = locations
        .iter()
        .take(LOCATION_ROW_LIMIT)
        .map(|l| LocationRow {
            location: l
                .name
                .clone()
                .or_else(|| l.code.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            code: or_na(l.code.as_deref()),
            region: or_na(l.region.as_deref()),
            data_sources: l.source_count,
            latest_data: or_na(l.latest_data.as_deref()),
            completeness: format!("{:.1}%", l.data_completeness * 100.0),
        })
        .collect();

    (rows, locations.len())
}
