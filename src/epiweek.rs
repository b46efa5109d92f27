//! CDC epidemiological week conversion.
//!
//! Epiweeks are encoded as `YYYYWW` integers. Weeks run Sunday through
//! Saturday and week 1 is the first week holding at least four days of
//! January, so January 4th always falls inside it.

use chrono::{Datelike, Days, NaiveDate};
use std::fmt;

/// Placeholder rendered wherever a date cannot be produced.
pub const NOT_AVAILABLE: &str = "N/A";

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// A decoded `YYYYWW` epiweek.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epiweek {
    pub year: i32,
    pub week: u32,
}

impl Epiweek {
    /// Splits a `YYYYWW` code into year and week.
    ///
    /// Returns `None` for non-positive codes, weeks outside `1..=53` and
    /// years outside `1..=9999`. Week 53 is accepted for every year.
    pub fn from_code(code: i64) -> Option<Self> {
        if code <= 0 {
            return None;
        }

        let year = i32::try_from(code / 100).ok()?;
        let week = u32::try_from(code % 100).ok()?;

        if !(1..=53).contains(&week) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }

        Some(Self { year, week })
    }

    pub fn code(&self) -> i64 {
        i64::from(self.year) * 100 + i64::from(self.week)
    }

    /// Sunday of the first epiweek of `self.year`.
    fn week1_sunday(&self) -> Option<NaiveDate> {
        let jan4 = NaiveDate::from_ymd_opt(self.year, 1, 4)?;

        let days_to_sunday = (6 - jan4.weekday().num_days_from_monday()) % 7;
        let sunday = jan4.checked_add_days(Days::new(u64::from(days_to_sunday)))?;

        // A Sunday more than three days past Jan 4 already belongs to week 2.
        if days_to_sunday > 3 {
            sunday.checked_sub_days(Days::new(7))
        } else {
            Some(sunday)
        }
    }

    /// The Sunday that starts this epiweek, or `None` when the date leaves
    /// the representable `YYYY-MM-DD` range.
    pub fn week_start(&self) -> Option<NaiveDate> {
        let offset = u64::from(self.week - 1) * 7;
        let date = self.week1_sunday()?.checked_add_days(Days::new(offset))?;

        (MIN_YEAR..=MAX_YEAR).contains(&date.year()).then_some(date)
    }
}

impl fmt::Display for Epiweek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.week)
    }
}

/// Sunday of the epiweek `code`, if it can be computed.
pub fn week_start(code: i64) -> Option<NaiveDate> {
    Epiweek::from_code(code)?.week_start()
}

/// Converts a `YYYYWW` epiweek to the ISO date (`YYYY-MM-DD`) of its Sunday.
///
/// Never fails: absent, malformed or out-of-range input yields
/// [`NOT_AVAILABLE`].
///
/// ```
/// use flu_dashboard::epiweek::epiweek_to_date;
///
/// assert_eq!(epiweek_to_date(Some(202603)), "2026-01-18");
/// assert_eq!(epiweek_to_date(Some(202654)), "N/A");
/// ```
pub fn epiweek_to_date(epiweek: Option<i64>) -> String {
    epiweek
        .and_then(week_start)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_known_week() {
        assert_eq!(epiweek_to_date(Some(202603)), "2026-01-18");
        assert_eq!(epiweek_to_date(Some(202601)), "2026-01-04");
    }

    #[test]
    fn test_sentinels() {
        assert_eq!(epiweek_to_date(None), NOT_AVAILABLE);
        assert_eq!(epiweek_to_date(Some(0)), NOT_AVAILABLE);
        assert_eq!(epiweek_to_date(Some(-202603)), NOT_AVAILABLE);
        assert_eq!(epiweek_to_date(Some(202600)), NOT_AVAILABLE);
        assert_eq!(epiweek_to_date(Some(202654)), NOT_AVAILABLE);
    }

    #[test]
    fn test_out_of_range_years() {
        // year 0
        assert_eq!(epiweek_to_date(Some(5)), NOT_AVAILABLE);
        assert_eq!(epiweek_to_date(Some(1_000_001)), NOT_AVAILABLE);
        assert_eq!(epiweek_to_date(Some(i64::MAX)), NOT_AVAILABLE);
        // 9999 week 53 would land in year 10000
        assert_eq!(epiweek_to_date(Some(999953)), NOT_AVAILABLE);
    }

    #[test]
    fn test_week1_correction_when_jan4_early_in_week() {
        // 2021-01-04 is a Monday: the following Sunday is six days out, so
        // week 1 starts on 2021-01-03.
        assert_eq!(epiweek_to_date(Some(202101)), "2021-01-03");
        // 2024-01-04 is a Thursday: no correction, the Sunday after it.
        assert_eq!(epiweek_to_date(Some(202401)), "2024-01-07");
    }

    #[test]
    fn test_week_53_is_accepted() {
        assert_eq!(epiweek_to_date(Some(202653)), "2027-01-03");
    }

    #[test]
    fn test_every_week_is_a_sunday() {
        for year in 2015..=2030 {
            for week in 1..=53 {
                let date = week_start(year * 100 + week).unwrap();
                assert_eq!(date.weekday(), Weekday::Sun, "epiweek {year}{week:02}");
            }
        }
    }

    #[test]
    fn test_consecutive_weeks_are_seven_days_apart() {
        for year in 2015..=2030 {
            for week in 1..=52 {
                let a = week_start(year * 100 + week).unwrap();
                let b = week_start(year * 100 + week + 1).unwrap();
                assert_eq!((b - a).num_days(), 7);
            }
        }
    }

    #[test]
    fn test_display_round_trips_code() {
        let ew = Epiweek::from_code(202407).unwrap();
        assert_eq!(ew.year, 2024);
        assert_eq!(ew.week, 7);
        assert_eq!(ew.to_string(), "202407");
        assert_eq!(ew.code(), 202407);
    }

    #[test]
    fn test_repeatable() {
        assert_eq!(epiweek_to_date(Some(201852)), epiweek_to_date(Some(201852)));
    }
}
