//! # Temporal Helpers
//!
//! Date-of-birth parsing and whole-year age computation for the submission
//! age gate.

use chrono::{Datelike, NaiveDate};

use crate::error::ValidationError;

/// Parse a date of birth in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] for anything that is not a valid
/// calendar date in that form.
pub fn parse_date_of_birth(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

/// Age in completed calendar years as of `today`.
///
/// A birthday later in the current year has not completed, so it does not
/// count: someone born 2000-06-01 is 17 on 2018-05-31 and 18 on 2018-06-01.
/// A date of birth in the future yields a negative age.
pub fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_date_of_birth("1990-04-12").unwrap(), date(1990, 4, 12));
        assert_eq!(parse_date_of_birth(" 1990-04-12 ").unwrap(), date(1990, 4, 12));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(parse_date_of_birth("12/04/1990").is_err());
        assert!(parse_date_of_birth("1990-13-01").is_err());
        assert!(parse_date_of_birth("1990-02-30").is_err());
        assert!(parse_date_of_birth("").is_err());
    }

    #[test]
    fn age_on_birthday_counts_the_year() {
        assert_eq!(age_in_years(date(2000, 6, 1), date(2018, 6, 1)), 18);
    }

    #[test]
    fn age_day_before_birthday_does_not() {
        assert_eq!(age_in_years(date(2000, 6, 1), date(2018, 5, 31)), 17);
    }

    #[test]
    fn age_born_today_is_zero() {
        assert_eq!(age_in_years(date(2026, 8, 5), date(2026, 8, 5)), 0);
    }

    #[test]
    fn age_future_birth_is_negative() {
        assert_eq!(age_in_years(date(2030, 1, 1), date(2026, 8, 5)), -4);
    }

    #[test]
    fn leap_day_birthday_completes_on_march_first() {
        // Feb 29 birthdays: in a non-leap year the (month, day) comparison
        // treats Mar 1 as the first day the year has completed.
        assert_eq!(age_in_years(date(2008, 2, 29), date(2026, 2, 28)), 17);
        assert_eq!(age_in_years(date(2008, 2, 29), date(2026, 3, 1)), 18);
    }
}
