//! Data quality page: per-source freshness, configured sources and the
//! aggregate quality figures.

use serde::Serialize;

use crate::metrics::quality::{FreshnessStatus, StatusColor};
use crate::metrics::{data_quality_score, format_number, status_color};
use crate::models::{DataSourceInfo, FreshnessReport, QualityReport};
use crate::views::mean;

const DESCRIPTION_WIDTH: usize = 60;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FreshnessRow {
    pub source: String,
    pub status: String,
    pub hours_old: String,
    pub records: u64,
}

pub fn freshness_rows(report: &FreshnessReport) -> Vec<FreshnessRow> {
    report
        .sources
        .iter()
        .map(|s| {
            let status = s.status.as_deref().unwrap_or("unknown");
            FreshnessRow {
                source: s.name.clone().unwrap_or_else(|| "Unknown".to_string()),
                status: format!("{} {status}", status_color(status).marker()),
                hours_old: format_number(Some(s.hours_since_update.unwrap_or(0.0)), 1),
                records: s.record_count.unwrap_or(0),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
    pub color: String,
}

/// Source counts per status label, in first-seen order.
pub fn status_distribution(report: &FreshnessReport) -> Vec<StatusCount> {
    let mut counts: Vec<StatusCount> = Vec::new();

    for source in &report.sources {
        let label = source.status.as_deref().unwrap_or("unknown");
        match counts.iter_mut().find(|c| c.status == label) {
            Some(c) => c.count += 1,
            None => counts.push(StatusCount {
                status: label.to_string(),
                count: 1,
                color: status_color(label).hex().to_string(),
            }),
        }
    }

    counts
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualitySummary {
    /// Score recomputed from the freshness records.
    pub freshness_score: String,
    /// Score as reported by the API, when present.
    pub reported_score: String,
    pub avg_completeness: String,
    pub on_schedule: String,
}

pub fn quality_summary(
    freshness: Option<&FreshnessReport>,
    report: Option<&QualityReport>,
) -> QualitySummary {
    let sources = freshness.map(|f| f.sources.as_slice()).unwrap_or(&[]);

    let completeness: Vec<f64> = report
        .map(|r| r.completeness.values().copied().collect())
        .unwrap_or_default();

    let percent = |v: Option<f64>| match format_number(v, 1).as_str() {
        "N/A" => "N/A".to_string(),
        s => format!("{s}%"),
    };

    QualitySummary {
        freshness_score: percent(Some(data_quality_score(sources))),
        reported_score: percent(
            report
                .map(|r| r.overall_quality_score)
                .or_else(|| freshness.and_then(|f| f.overall_quality_score)),
        ),
        avg_completeness: percent(mean(&completeness)),
        on_schedule: match report {
            Some(r) if r.timeliness.on_schedule => "✅ Yes".to_string(),
            _ => "❌ No".to_string(),
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSourceRow {
    pub source: String,
    pub description: String,
    pub update_frequency: String,
    pub enabled: String,
}

pub fn data_source_rows(sources: &[DataSourceInfo]) -> Vec<DataSourceRow> {
    sources
        .iter()
        .map(|s| {
            let description: String = s
                .description
                .as_deref()
                .unwrap_or("N/A")
                .chars()
                .take(DESCRIPTION_WIDTH)
                .collect();

            DataSourceRow {
                source: s.name.clone().unwrap_or_else(|| "Unknown".to_string()),
                description: format!("{description}..."),
                update_frequency: s.update_frequency.clone().unwrap_or_else(|| "N/A".to_string()),
                enabled: if s.enabled { "✅" } else { "❌" }.to_string(),
            }
        })
        .collect()
}

/// Sources whose freshness needs attention (anything not fresh).
pub fn attention_needed(report: &FreshnessReport) -> Vec<(String, StatusColor)> {
    report
        .sources
        .iter()
        .filter(|s| s.freshness() != FreshnessStatus::Fresh)
        .map(|s| {
            let name = s.name.clone().unwrap_or_else(|| "Unknown".to_string());
            (name, status_color(s.status.as_deref().unwrap_or("missing")))
        })
        .collect()
}
