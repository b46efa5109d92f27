//! Data freshness classification and the overall quality score.

use serde::{Deserialize, Serialize};

use crate::config::{COLOR_FRESH, COLOR_MISSING, COLOR_PRIMARY, COLOR_STALE};

/// Freshness of one upstream data source, as reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreshnessRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub hours_since_update: Option<f64>,
    #[serde(default)]
    pub record_count: Option<u64>,
}

impl FreshnessRecord {
    pub fn new(name: &str, status: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    pub fn freshness(&self) -> FreshnessStatus {
        self.status
            .as_deref()
            .map(FreshnessStatus::from_label)
            .unwrap_or(FreshnessStatus::Missing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FreshnessStatus {
    Fresh,
    Stale,
    Missing,
    Unknown,
}

impl FreshnessStatus {
    /// Exact, case-sensitive match on the API's lowercase labels.
    pub fn from_label(label: &str) -> Self {
        match label {
            "fresh" => FreshnessStatus::Fresh,
            "stale" => FreshnessStatus::Stale,
            "missing" => FreshnessStatus::Missing,
            _ => FreshnessStatus::Unknown,
        }
    }

    /// Contribution of one source to the quality score.
    pub fn weight(&self) -> f64 {
        match self {
            FreshnessStatus::Fresh => 1.0,
            FreshnessStatus::Stale => 0.5,
            FreshnessStatus::Missing | FreshnessStatus::Unknown => 0.0,
        }
    }
}

/// Mean freshness weight of `records`, scaled to `[0, 100]`.
/// No records scores 0.0.
pub fn data_quality_score(records: &[FreshnessRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }

    let total: f64 = records.iter().map(|r| r.freshness().weight()).sum();

    total / records.len() as f64 * 100.0
}

/// Share of fresh sources as a whole percentage, truncated.
pub fn fresh_percent(records: &[FreshnessRecord]) -> u32 {
    if records.is_empty() {
        return 0;
    }
    let fresh = count_with_status(records, FreshnessStatus::Fresh);
    (100 * fresh / records.len()) as u32
}

pub fn count_with_status(records: &[FreshnessRecord], status: FreshnessStatus) -> usize {
    records.iter().filter(|r| r.freshness() == status).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Yellow,
    Red,
    Neutral,
}

impl StatusColor {
    pub fn marker(&self) -> &'static str {
        match self {
            StatusColor::Green => "🟢",
            StatusColor::Yellow => "🟡",
            StatusColor::Red => "🔴",
            StatusColor::Neutral => "⚪",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            StatusColor::Green => COLOR_FRESH,
            StatusColor::Yellow => COLOR_STALE,
            StatusColor::Red => COLOR_MISSING,
            StatusColor::Neutral => COLOR_PRIMARY,
        }
    }
}

/// Badge color for a freshness label, ignoring case.
pub fn status_color(status: &str) -> StatusColor {
    match FreshnessStatus::from_label(&status.to_lowercase()) {
        FreshnessStatus::Fresh => StatusColor::Green,
        FreshnessStatus::Stale => StatusColor::Yellow,
        FreshnessStatus::Missing => StatusColor::Red,
        FreshnessStatus::Unknown => StatusColor::Neutral,
    }
}
