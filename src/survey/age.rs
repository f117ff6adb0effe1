use chrono::{DateTime, Datelike, NaiveDate};

/// Parse a date of birth as submitted by the form.
///
/// HTML date inputs send `YYYY-MM-DD`; full RFC 3339 timestamps are also
/// accepted and reduced to their calendar date.
pub fn parse_date_of_birth(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

/// Age in whole years on `today`, from calendar fields only.
///
/// Birthdays on Feb 29 count as not yet reached until Mar 1 in common years.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
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
    fn test_age_day_before_birthday() {
        assert_eq!(age_on(date(2000, 6, 16), date(2024, 6, 15)), 23);
    }

    #[test]
    fn test_age_day_after_birthday() {
        assert_eq!(age_on(date(2000, 6, 14), date(2024, 6, 15)), 24);
    }

    #[test]
    fn test_age_on_birthday() {
        assert_eq!(age_on(date(2000, 6, 15), date(2024, 6, 15)), 24);
    }

    #[test]
    fn test_age_earlier_month_later_day() {
        // Month decides before day
        assert_eq!(age_on(date(2000, 5, 30), date(2024, 6, 1)), 24);
        assert_eq!(age_on(date(2000, 7, 1), date(2024, 6, 30)), 23);
    }

    #[test]
    fn test_age_leap_day_birthday() {
        assert_eq!(age_on(date(2000, 2, 29), date(2023, 2, 28)), 22);
        assert_eq!(age_on(date(2000, 2, 29), date(2023, 3, 1)), 23);
        assert_eq!(age_on(date(2000, 2, 29), date(2024, 2, 29)), 24);
    }

    #[test]
    fn test_age_future_birth_date_is_negative() {
        assert_eq!(age_on(date(2030, 1, 1), date(2024, 6, 15)), -6);
    }

    #[test]
    fn test_parse_date_of_birth_formats() {
        assert_eq!(parse_date_of_birth("2000-06-16"), Some(date(2000, 6, 16)));
        assert_eq!(parse_date_of_birth(" 1999-12-31 "), Some(date(1999, 12, 31)));
        assert_eq!(
            parse_date_of_birth("2000-06-16T00:00:00Z"),
            Some(date(2000, 6, 16))
        );
        assert_eq!(parse_date_of_birth("2000-02-30"), None);
        assert_eq!(parse_date_of_birth("16/06/2000"), None);
        assert_eq!(parse_date_of_birth("yesterday"), None);
    }
}
