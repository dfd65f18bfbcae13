//! Textual timezone specifications, as found in configuration files.
//!
//! | Text                          | Zone                                 |
//! |-------------------------------|--------------------------------------|
//! | `UTC`, `Z`                    | [`chrono::Utc`]                      |
//! | `+05:30`, `-0800`, `+01`      | [`chrono::FixedOffset`]              |
//! | `posix:EST5EDT,M3.2.0,M11.1.0`| [`DstTable`](super::DstTable)        |
//! | `America/New_York`            | `chrono_tz::Tz` (feature `tzdb`)     |
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{FixedOffset, Utc};

use super::{DstTable, Timezone};
use crate::Error;

/// Years covered by the transitions of a `posix:` zone.
pub const POSIX_RULE_YEARS: RangeInclusive<i32> = 1900..=2100;

const POSIX_PREFIX: &str = "posix:";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum ZoneSpec {
    #[default]
    Utc,
    Fixed(FixedOffset),
    Posix(String),
    Named(String),
}

impl ZoneSpec {
    /// Builds the timezone this specification names.
    ///
    /// # Errors
    ///
    /// Will return `Error::TimezoneUnavailable` for a named zone when the tz
    /// database is not compiled in, `Error::UnknownTimezone` if the name is not
    /// in the database, and `Error::InvalidPosixRule` for a bad `posix:` rule.
    pub fn resolve(&self) -> Result<Arc<dyn Timezone>, Error> {
        match self {
            ZoneSpec::Utc => Ok(Arc::new(Utc)),
            ZoneSpec::Fixed(offset) => Ok(Arc::new(*offset)),
            ZoneSpec::Posix(rule) => Ok(Arc::new(DstTable::from_posix(rule, POSIX_RULE_YEARS)?)),
            ZoneSpec::Named(name) => named(name),
        }
    }
}

#[cfg(feature = "tzdb")]
fn named(name: &str) -> Result<Arc<dyn Timezone>, Error> {
    let tz: chrono_tz::Tz = name.parse().map_err(|_| Error::UnknownTimezone(name.to_owned()))?;
    Ok(Arc::new(tz))
}

#[cfg(not(feature = "tzdb"))]
fn named(name: &str) -> Result<Arc<dyn Timezone>, Error> {
    Err(Error::TimezoneUnavailable(name.to_owned()))
}

impl FromStr for ZoneSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();

        if text.eq_ignore_ascii_case("utc") || text == "Z" {
            return Ok(ZoneSpec::Utc);
        }
        if text.starts_with('+') || text.starts_with('-') {
            return parse_offset(text).map(ZoneSpec::Fixed);
        }
        if let Some(rule) = text.strip_prefix(POSIX_PREFIX) {
            return Ok(ZoneSpec::Posix(rule.to_owned()));
        }
        if text.is_empty() {
            return Err(Error::UnknownTimezone(s.to_owned()));
        }

        Ok(ZoneSpec::Named(text.to_owned()))
    }
}

impl fmt::Display for ZoneSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneSpec::Utc => f.write_str("UTC"),
            ZoneSpec::Fixed(offset) => write!(f, "{offset}"),
            ZoneSpec::Posix(rule) => write!(f, "{POSIX_PREFIX}{rule}"),
            ZoneSpec::Named(name) => f.write_str(name),
        }
    }
}

/// `+HH`, `+HHMM` or `+HH:MM`, and the same with `-`.
fn parse_offset(text: &str) -> Result<FixedOffset, Error> {
    let invalid = || Error::InvalidOffset(text.to_owned());

    let (sign, rest) = if let Some(rest) = text.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = text.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid());
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !matches!(digits.len(), 2 | 4) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
    let minutes: i32 = if digits.len() == 4 {
        digits[2..].parse().map_err(|_| invalid())?
    } else {
        0
    };
    if minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
