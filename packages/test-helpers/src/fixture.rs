//! Civil times and timestamps the tests freeze the clock at.
use chrono::{NaiveDate, NaiveDateTime};

/// POSIX rule of the US Eastern time zone since 2007.
pub const US_EASTERN_POSIX_RULE: &str = "EST5EDT,M3.2.0,M11.1.0";

/// `2014-01-01T00:00:00` read in UTC.
pub const NEW_YEAR_2014_UTC_TIMESTAMP: f64 = 1_388_534_400.0;

/// `2014-01-01T00:00:00` read in `America/New_York`.
pub const NEW_YEAR_2014_NEW_YORK_TIMESTAMP: f64 = 1_388_552_400.0;

/// `2018-11-04T01:30:00` read in `America/New_York` as EDT.
pub const REPEATED_HOUR_EARLIER_TIMESTAMP: f64 = 1_541_309_400.0;

/// `2018-11-04T01:30:00` read in `America/New_York` as EST.
pub const REPEATED_HOUR_LATER_TIMESTAMP: f64 = 1_541_313_000.0;

/// # Panics
///
/// Will panic if the arguments are not a valid civil time.
#[must_use]
pub fn civil(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .expect("a valid civil time")
}

#[must_use]
pub fn new_year_2014() -> NaiveDateTime {
    civil(2014, 1, 1, 0, 0, 0)
}

/// `America/New_York` went through `01:00-02:00` twice on this day.
#[must_use]
pub fn repeated_hour_2018() -> NaiveDateTime {
    civil(2018, 11, 4, 1, 30, 0)
}

/// `America/New_York` skipped `02:00-03:00` on this day.
#[must_use]
pub fn skipped_hour_2018() -> NaiveDateTime {
    civil(2018, 3, 11, 2, 30, 0)
}

/// Any real clock reads a time after this one.
#[must_use]
pub fn sentinel_2016() -> NaiveDateTime {
    civil(2016, 1, 1, 0, 0, 0)
}
