//! Dashboard pages reduced to rows.
//!
//! Each view turns API payloads into flat, serializable rows ready to be
//! logged or exported. Nothing here performs I/O.

pub mod forecasts;
pub mod health;
pub mod models;
pub mod overview;
pub mod quality;
pub mod surveillance;

/// `"data_pipeline"` -> `"Data Pipeline"`.
pub(crate) fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Component status strings count as healthy when they mention "healthy"
/// without being "unhealthy".
pub(crate) fn is_healthy(status: &str) -> bool {
    let lower = status.to_lowercase();
    lower.contains("healthy") && !lower.contains("unhealthy")
}

/// Renders a JSON scalar without quotes around strings.
pub(crate) fn plain_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub(crate) fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(crate::epiweek::NOT_AVAILABLE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("data_pipeline"), "Data Pipeline");
        assert_eq!(title_case("database"), "Database");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_is_healthy() {
        assert!(is_healthy("Healthy"));
        assert!(is_healthy("healthy (12ms)"));
        assert!(!is_healthy("unhealthy"));
        assert!(!is_healthy("down"));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[90.0, 100.0]), Some(95.0));
    }

    #[test]
    fn test_plain_value() {
        assert_eq!(plain_value(&serde_json::json!("healthy")), "healthy");
        assert_eq!(plain_value(&serde_json::json!(true)), "true");
    }
}
