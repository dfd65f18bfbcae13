use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{DurationSinceUnixEpoch, Error};

const CIVIL_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// It parses a civil time (no timezone) in ISO 8601 format.
///
/// For example `2014-01-01T00:00:00`, `2014-01-01 00:00:00.250` or just
/// the date `2014-01-01`, which is read as midnight.
///
/// # Errors
///
/// Will return `Error::InvalidCivilTime` if the text matches none of the formats.
pub fn parse_civil_time(text: &str) -> Result<NaiveDateTime, Error> {
    let text = text.trim();

    CIVIL_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| Error::InvalidCivilTime(text.to_owned()))
}

/// It converts a `DateTime::<Utc>` to a timestamp.
/// For example, the `DateTime::<Utc>` of the Unix Epoch will be converted to a
/// timestamp of 0: `DurationSinceUnixEpoch::ZERO`.
///
/// # Errors
///
/// Will return `Error::BeforeUnixEpoch` for instants before 1970.
pub fn convert_from_datetime_utc_to_timestamp(datetime_utc: &DateTime<Utc>) -> Result<DurationSinceUnixEpoch, Error> {
    let seconds = u64::try_from(datetime_utc.timestamp()).map_err(|_| Error::BeforeUnixEpoch)?;

    Ok(Duration::new(seconds, datetime_utc.timestamp_subsec_nanos()))
}

/// It converts a `DateTime::<Utc>` to seconds since the Unix Epoch, the
/// microseconds being the fractional part.
#[must_use]
pub fn convert_from_datetime_utc_to_epoch_seconds(datetime_utc: &DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let seconds = datetime_utc.timestamp() as f64;

    seconds + f64::from(datetime_utc.timestamp_subsec_micros()) / 1e6
}
