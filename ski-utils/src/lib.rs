//! Shared utility functions for ski weather crates.

/// Date utility functions
pub mod dates {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    /// Storage format for calendar dates.
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Storage format for timestamps (lexicographically ordered).
    pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Format a NaiveDateTime as "YYYY-MM-DD HH:MM:SS"
    pub fn format_date_time(ts: &NaiveDateTime) -> String {
        ts.format(DATE_TIME_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)?)
    }

    /// Parse a timestamp leniently.
    ///
    /// Accepts `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, either of those
    /// without seconds, or a bare `YYYY-MM-DD` (taken as midnight).
    pub fn parse_date_time(s: &str) -> anyhow::Result<NaiveDateTime> {
        let s = s.trim();
        for fmt in [
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%Y-%m-%dT%H:%M",
        ] {
            if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(ts);
            }
        }
        let date = parse_date(s)?;
        Ok(date.and_time(NaiveTime::MIN))
    }

    /// Midnight at the start of `date`.
    pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN)
    }

}

/// Decimal rounding for reported measurements
pub mod rounding {
    /// Round `value` to `places` decimal places (half away from zero).
    pub fn round_to(value: f64, places: i32) -> f64 {
        let factor = 10f64.powi(places);
        (value * factor).round() / factor
    }

    /// [`round_to`] lifted over an optional value.
    pub fn round_opt(value: Option<f64>, places: i32) -> Option<f64> {
        value.map(|v| round_to(v, places))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_round_to() {
            assert_eq!(round_to(35.769, 1), 35.8);
            assert_eq!(round_to(1.2049, 2), 1.2);
            assert_eq!(round_to(-1.26, 1), -1.3);
            assert_eq!(round_to(179.6, 0), 180.0);
        }

        #[test]
        fn test_round_opt() {
            assert_eq!(round_opt(None, 1), None);
            assert_eq!(round_opt(Some(2.25), 1), Some(2.3));
        }
    }
}
