use serde::Serialize;

use crate::epiweek::{NOT_AVAILABLE, epiweek_to_date};
use crate::metrics::format::format_confidence_interval;
use crate::metrics::{ChangeResult, admission_change, format_admission_value};
use crate::models::SurveillanceRecord;
use crate::views::or_na;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurveillanceRow {
    pub epiweek: String,
    pub week_start: String,
    pub location: String,
    pub admissions: String,
    /// Prediction interval of forecast records, blank otherwise.
    pub interval: String,
    /// Change against the next-older record, blank for the oldest.
    pub change: String,
}

/// Builds table rows from newest-first records.
pub fn surveillance_rows(records: &[SurveillanceRecord]) -> Vec<SurveillanceRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let change = records
                .get(i + 1)
                .map(|older| change_between(r, older).to_string())
                .unwrap_or_default();

            SurveillanceRow {
                epiweek: r
                    .epiweek
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                week_start: epiweek_to_date(r.epiweek),
                location: or_na(r.location.as_deref()),
                admissions: format_admission_value(r.hospital_admissions),
                interval: match (r.lower_bound, r.upper_bound) {
                    (Some(lower), Some(upper)) => format_confidence_interval(lower, upper),
                    _ => String::new(),
                },
                change,
            }
        })
        .collect()
}

/// Missing admission counts are treated as zero.
fn change_between(current: &SurveillanceRecord, previous: &SurveillanceRecord) -> ChangeResult {
    admission_change(
        current.hospital_admissions.unwrap_or(0.0),
        previous.hospital_admissions.unwrap_or(0.0),
    )
}

/// Change from the second-newest to the newest record, when there are two.
pub fn latest_change(records: &[SurveillanceRecord]) -> Option<ChangeResult> {
    match records {
        [latest, previous, ..] => Some(change_between(latest, previous)),
        _ => None,
    }
}

/// Chronological `(week_start, admissions)` points for charting. Records
/// without a convertible epiweek or a value are skipped.
pub fn admission_series(records: &[SurveillanceRecord]) -> Vec<(chrono::NaiveDate, f64)> {
    let mut points: Vec<_> = records
        .iter()
        .filter_map(|r| {
            let date = crate::epiweek::week_start(r.epiweek?)?;
            let value = r.hospital_admissions.filter(|v| !v.is_nan())?;
            Some((date, value))
        })
        .collect();
    points.sort_by_key(|(date, _)| *date);
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Direction;

    fn record(epiweek: i64, admissions: Option<f64>) -> SurveillanceRecord {
        SurveillanceRecord {
            epiweek: Some(epiweek),
            location: Some("US".to_string()),
            hospital_admissions: admissions,
            ..Default::default()
        }
    }

    #[test]
    fn test_rows_convert_epiweeks_and_values() {
        let rows = surveillance_rows(&[record(202603, Some(4210.0)), record(202602, Some(3500.0))]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].epiweek, "202603");
        assert_eq!(rows[0].week_start, "2026-01-18");
        assert_eq!(rows[0].admissions, "4,210");
        assert!(rows[0].change.starts_with("📈"));
        assert_eq!(rows[1].change, "");
    }

    #[test]
    fn test_forecast_records_carry_interval() {
        let forecast = SurveillanceRecord {
            lower_bound: Some(4100.4),
            upper_bound: Some(5200.6),
            ..record(202605, Some(4600.0))
        };
        let half_bounded = SurveillanceRecord {
            lower_bound: Some(3900.0),
            ..record(202604, Some(4400.0))
        };

        let rows = surveillance_rows(&[forecast, half_bounded, record(202603, Some(4210.0))]);
        assert_eq!(rows[0].interval, "[4100, 5201]");
        assert_eq!(rows[1].interval, "");
        assert_eq!(rows[2].interval, "");
    }

    #[test]
    fn test_rows_with_missing_fields() {
        let rows = surveillance_rows(&[SurveillanceRecord::default()]);
        assert_eq!(rows[0].epiweek, "N/A");
        assert_eq!(rows[0].week_start, "N/A");
        assert_eq!(rows[0].location, "N/A");
        assert_eq!(rows[0].admissions, "N/A");
    }

    #[test]
    fn test_latest_change() {
        assert_eq!(latest_change(&[record(202603, Some(1.0))]), None);

        let change = latest_change(&[record(202603, Some(105.0)), record(202602, Some(100.0))]).unwrap();
        assert_eq!(change.direction, Direction::Flat);

        let change = latest_change(&[record(202603, Some(50.0)), record(202602, None)]).unwrap();
        assert_eq!(change.direction, Direction::Flat);
        assert_eq!(change.percent_change, 0.0);
    }

    #[test]
    fn test_admission_series_is_chronological() {
        let series = admission_series(&[
            record(202603, Some(3.0)),
            record(202654, Some(9.0)),
            record(202601, Some(1.0)),
            record(202602, None),
        ]);
        let dates: Vec<String> = series.iter().map(|(d, _)| d.to_string()).collect();
        assert_eq!(dates, vec!["2026-01-04", "2026-01-18"]);
    }
}
