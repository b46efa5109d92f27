//! Display formatters. Missing or non-finite values render as `N/A`.

use chrono::NaiveDate;

use crate::config::{COLOR_PRIMARY, MODEL_COLORS};
use crate::epiweek::NOT_AVAILABLE;

/// Fixed-point rendering with `decimals` digits.
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{v:.decimals$}"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Admission counts: truncated to an integer, grouped by thousands.
/// Magnitudes beyond `i64` keep all their digits.
pub fn format_admission_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            // -0.5 truncates to -0.0, which would print as "-0"
            let whole = if v.trunc() == 0.0 { 0.0 } else { v.trunc() };
            group_digits(&format!("{whole:.0}"))
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(n: i64) -> String {
    group_digits(&n.to_string())
}

/// Inserts separators into an optionally signed run of decimal digits.
fn group_digits(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let mut out = String::with_capacity(number.len() + digits.len() / 3);
    out.push_str(sign);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Largest whole unit only: `45s`, `1m`, `2h`, `2d`.
pub fn format_uptime(seconds: i64) -> String {
    match seconds {
        s if s < 60 => format!("{s}s"),
        s if s < 3_600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3_600),
        s => format!("{}d", s / 86_400),
    }
}

pub fn format_confidence_interval(lower: f64, upper: f64) -> String {
    format!("[{lower:.0}, {upper:.0}]")
}

/// Re-renders a `YYYY-MM-DD` date with `fmt`. Anything unparsable is
/// returned as given.
pub fn format_date(date: &str, fmt: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format(fmt).to_string(),
        Err(_) => date.to_string(),
    }
}

/// Whole days from `date` to `today`, never negative. Unparsable dates give 0.
pub fn days_ago(date: &str, today: NaiveDate) -> i64 {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| (today - d).num_days().max(0))
        .unwrap_or(0)
}

pub fn forecast_model_color(model: &str) -> &'static str {
    MODEL_COLORS
        .iter()
        .find(|(name, _)| *name == model)
        .map(|(_, color)| *color)
        .unwrap_or(COLOR_PRIMARY)
}
