//! Model training status and comparison tables.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::metrics::format_number;
use crate::models::{ModelComparison, ModelStatus};
use crate::views::{or_na, plain_value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingStatus {
    pub last_training: String,
    pub status: String,
    pub models_trained: usize,
    pub duration: String,
}

pub fn training_status(status: &ModelStatus) -> TrainingStatus {
    TrainingStatus {
        last_training: status
            .last_training_date
            .clone()
            .unwrap_or_else(|| "Never".to_string()),
        status: status.status.clone().unwrap_or_else(|| "Unknown".to_string()),
        models_trained: status.models.len(),
        duration: format!("{}s", status.duration_seconds),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub model: String,
    pub mae: String,
    pub rmse: String,
    pub wis: String,
    pub coverage: String,
}

pub fn comparison_rows(comparison: &ModelComparison) -> Vec<ComparisonRow> {
    comparison
        .models
        .iter()
        .map(|m| ComparisonRow {
            model: or_na(
                m.get("model")
                    .or_else(|| m.get("model_name"))
                    .map(plain_value)
                    .as_deref(),
            ),
            mae: metric(m, "mae"),
            rmse: metric(m, "rmse"),
            wis: metric(m, "wis"),
            coverage: metric(m, "coverage"),
        })
        .collect()
}

fn metric(row: &Map<String, Value>, key: &str) -> String {
    format_number(row.get(key).and_then(Value::as_f64), 2)
}
