//! Timezones a clock can be simulated in and observed from.
//!
//! Every zone is used through the [`Timezone`] trait. There are two families:
//!
//! - Stateless offset rules: `Utc`, `FixedOffset` and `chrono_tz::Tz`. They
//!   resolve ambiguous civil times with `chrono`'s own `LocalResult`, and the
//!   fold is honored the way PEP 495 defines it.
//! - DST tables: [`DstTable`], a list of transitions between standard and
//!   daylight periods. Ambiguity is resolved by comparing the instants obtained
//!   assuming DST and assuming standard time, see [`DstTable::dst_from_fold`].
pub mod dst;
pub mod spec;

use std::fmt::Debug;

use chrono::{DateTime, Days, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};

pub use self::dst::{DstTable, Period, Transition};
pub use self::spec::ZoneSpec;
use crate::Error;

/// Selects one of the two instants a civil time can map to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fold {
    /// The earlier instant (`fold = 0`).
    #[default]
    Earlier,
    /// The later instant (`fold = 1`).
    Later,
}

impl TryFrom<u8> for Fold {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Fold::Earlier),
            1 => Ok(Fold::Later),
            other => Err(Error::InvalidFold(other)),
        }
    }
}

impl From<Fold> for u8 {
    fn from(fold: Fold) -> Self {
        match fold {
            Fold::Earlier => 0,
            Fold::Later => 1,
        }
    }
}

/// A timezone the clock can attach to a civil time.
pub trait Timezone: Send + Sync + Debug {
    /// Resolves a civil time in this zone into an absolute instant.
    ///
    /// `fold` is only consulted when `local` is ambiguous or skipped.
    ///
    /// # Errors
    ///
    /// Will return `Error::OutOfRange` if the instant can not be represented.
    fn attach(&self, local: &NaiveDateTime, fold: Fold) -> Result<DateTime<Utc>, Error>;

    /// The offset from UTC in effect at `instant`.
    fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset;

    fn name(&self) -> String;

    /// Re-expresses an absolute instant in this zone.
    fn convert(&self, instant: &DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset_at(instant))
    }
}

impl Timezone for Utc {
    fn attach(&self, local: &NaiveDateTime, _fold: Fold) -> Result<DateTime<Utc>, Error> {
        Ok(Utc.from_utc_datetime(local))
    }

    fn offset_at(&self, _instant: &DateTime<Utc>) -> FixedOffset {
        Utc.fix()
    }

    fn name(&self) -> String {
        "UTC".to_owned()
    }
}

impl Timezone for FixedOffset {
    fn attach(&self, local: &NaiveDateTime, fold: Fold) -> Result<DateTime<Utc>, Error> {
        attach_with_local_result(self, local, fold)
    }

    fn offset_at(&self, _instant: &DateTime<Utc>) -> FixedOffset {
        *self
    }

    fn name(&self) -> String {
        self.to_string()
    }
}

#[cfg(feature = "tzdb")]
impl Timezone for chrono_tz::Tz {
    fn attach(&self, local: &NaiveDateTime, fold: Fold) -> Result<DateTime<Utc>, Error> {
        attach_with_local_result(self, local, fold)
    }

    fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        self.offset_from_utc_datetime(&instant.naive_utc()).fix()
    }

    fn name(&self) -> String {
        chrono_tz::Tz::name(*self).to_owned()
    }
}

/// Resolves `local` with the zone's native `LocalResult`.
///
/// A skipped civil time follows PEP 495: `Fold::Earlier` applies the offset in
/// effect before the transition and `Fold::Later` the offset after it.
fn attach_with_local_result<Tz: TimeZone>(zone: &Tz, local: &NaiveDateTime, fold: Fold) -> Result<DateTime<Utc>, Error> {
    match zone.from_local_datetime(local) {
        LocalResult::Single(resolved) => Ok(resolved.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, latest) => match fold {
            Fold::Earlier => Ok(earliest.with_timezone(&Utc)),
            Fold::Later => Ok(latest.with_timezone(&Utc)),
        },
        LocalResult::None => {
            let probe = match fold {
                Fold::Earlier => local.checked_sub_days(Days::new(1)),
                Fold::Later => local.checked_add_days(Days::new(1)),
            }
            .ok_or(Error::OutOfRange)?;

            local_to_utc(local, zone.offset_from_utc_datetime(&probe).fix())
        }
    }
}

/// The absolute instant of `local` read with a known `offset`.
pub(crate) fn local_to_utc(local: &NaiveDateTime, offset: FixedOffset) -> Result<DateTime<Utc>, Error> {
    let offset = TimeDelta::try_seconds(i64::from(offset.local_minus_utc())).ok_or(Error::OutOfRange)?;

    local
        .checked_sub_signed(offset)
        .map(|utc| Utc.from_utc_datetime(&utc))
        .ok_or(Error::OutOfRange)
}
