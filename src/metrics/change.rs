use serde::Serialize;
use std::fmt;

/// Generic trend band: changes within ±5% read as flat.
pub const TREND_THRESHOLD: f64 = 5.0;

/// Hospital admissions are noisier, so their flat band is ±10%.
pub const ADMISSION_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn symbol(&self) -> &'static str {
        match self {
            Direction::Up => "📈",
            Direction::Down => "📉",
            Direction::Flat => "➡️",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChangeResult {
    pub percent_change: f64,
    pub direction: Direction,
}

impl ChangeResult {
    pub fn flat() -> Self {
        Self {
            percent_change: 0.0,
            direction: Direction::Flat,
        }
    }
}

impl fmt::Display for ChangeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.1}%", self.direction, self.percent_change)
    }
}

/// Percent change from `previous` to `current`, classified against a
/// symmetric `threshold`. A zero baseline is reported as flat.
pub fn classify_change(current: f64, previous: f64, threshold: f64) -> ChangeResult {
    if previous == 0.0 {
        return ChangeResult::flat();
    }

    let percent_change = (current - previous) / previous * 100.0;

    let direction = match percent_change {
        p if p > threshold => Direction::Up,
        p if p < -threshold => Direction::Down,
        _ => Direction::Flat,
    };

    ChangeResult {
        percent_change,
        direction,
    }
}

pub fn percent_change(current: f64, previous: f64) -> ChangeResult {
    classify_change(current, previous, TREND_THRESHOLD)
}

pub fn admission_change(current: f64, previous: f64) -> ChangeResult {
    classify_change(current, previous, ADMISSION_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_zero_baseline_is_flat() {
        assert_eq!(percent_change(100.0, 0.0), ChangeResult::flat());
        assert_eq!(admission_change(100.0, 0.0), ChangeResult::flat());
    }

    #[test]
    fn test_percent_change_bands() {
        let up = percent_change(110.0, 100.0);
        assert!(approx(up.percent_change, 10.0));
        assert_eq!(up.direction, Direction::Up);

        let down = percent_change(94.0, 100.0);
        assert!(approx(down.percent_change, -6.0));
        assert_eq!(down.direction, Direction::Down);

        let flat = percent_change(102.0, 100.0);
        assert!(approx(flat.percent_change, 2.0));
        assert_eq!(flat.direction, Direction::Flat);
    }

    #[test]
    fn test_boundary_is_flat() {
        assert_eq!(percent_change(105.0, 100.0).direction, Direction::Flat);
        assert_eq!(percent_change(95.0, 100.0).direction, Direction::Flat);
        assert_eq!(admission_change(110.0, 100.0).direction, Direction::Flat);
        assert_eq!(admission_change(90.0, 100.0).direction, Direction::Flat);
    }

    #[test]
    fn test_admission_change_uses_wider_band() {
        assert_eq!(admission_change(111.0, 100.0).direction, Direction::Up);
        assert_eq!(admission_change(105.0, 100.0).direction, Direction::Flat);
        assert_eq!(admission_change(89.0, 100.0).direction, Direction::Down);
        // same input, different policy
        assert_eq!(percent_change(107.0, 100.0).direction, Direction::Up);
        assert_eq!(admission_change(107.0, 100.0).direction, Direction::Flat);
    }

    #[test]
    fn test_negative_baseline() {
        let r = percent_change(-50.0, -100.0);
        assert!(approx(r.percent_change, -50.0));
        assert_eq!(r.direction, Direction::Down);
    }

    #[test]
    fn test_nan_input_is_flat() {
        assert_eq!(percent_change(f64::NAN, 100.0).direction, Direction::Flat);
    }

    #[test]
    fn test_display() {
        assert_eq!(admission_change(120.0, 100.0).to_string(), "📈 20.0%");
        assert_eq!(ChangeResult::flat().to_string(), "➡️ 0.0%");
    }
}
