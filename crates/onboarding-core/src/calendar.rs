use chrono::{Datelike, NaiveDate, NaiveTime};

/// Date and time helpers for the dates and times the form collects.
///
/// Every function takes "today" explicitly so validation stays pure; only
/// [`FormCalendar::today`] reads the clock.
pub struct FormCalendar;

impl FormCalendar {
    /// Today's date in the local timezone
    pub fn today() -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    /// Parse a date input value (`YYYY-MM-DD`)
    pub fn parse_date(value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
    }

    /// Parse a time input value (`HH:MM`, or `HH:MM:SS` when the input has a step)
    pub fn parse_time(value: &str) -> Option<NaiveTime> {
        let value = value.trim();
        NaiveTime::parse_from_str(value, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
            .ok()
    }

    /// Exact calendar-year age on `today`.
    ///
    /// The year difference, minus one when this year's birthday has not been
    /// reached yet. Negative for birth dates in the future.
    pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
        let mut age = today.year() - dob.year();
        if (today.month(), today.day()) < (dob.month(), dob.day()) {
            age -= 1;
        }
        age
    }

    /// Age for a raw date-of-birth input, `None` when it does not parse
    pub fn age_from_input(dob: &str, today: NaiveDate) -> Option<i32> {
        Self::parse_date(dob).map(|dob| Self::age_on(dob, today))
    }

    /// Whole days from `today` until `date` (negative when in the past)
    pub fn days_from(today: NaiveDate, date: NaiveDate) -> i64 {
        (date - today).num_days()
    }

    /// Whether `end` falls strictly after `start` on the same day
    pub fn is_after_same_day(start: NaiveTime, end: NaiveTime) -> bool {
        end > start
    }
}
