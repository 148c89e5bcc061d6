//! Date display helpers.

use chrono::{Local, NaiveDate};

const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// Format a date as `DD-MM-YYYY` with zero-padded day and month.
///
pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Return the current local calendar date.
///
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use regex::Regex;

    #[test]
    fn test_format_date_pads_day_and_month() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "05-03-2024");
        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert_eq!(format_date(date), "31-12-1999");
    }

    #[test]
    fn test_format_date_pattern_holds_across_years() {
        let pattern = Regex::new(r"^\d{2}-\d{2}-\d{4}$").unwrap();
        let mut date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        while date.year() < 2025 {
            let formatted = format_date(date);
            assert!(pattern.is_match(&formatted), "{}", formatted);
            assert_eq!(
                formatted,
                format!("{:02}-{:02}-{}", date.day(), date.month(), date.year())
            );
            date = date.succ_opt().unwrap();
        }
    }
}
