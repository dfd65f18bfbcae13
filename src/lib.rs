//! Freeze the wall clock inside a test scope.
//!
//! Code under test reads the current time through this crate instead of
//! calling the system clock directly:
//!
//! | Function        | Returns                                          |
//! |-----------------|--------------------------------------------------|
//! | [`now_naive`]   | civil time in the clock's local timezone         |
//! | [`now_in`]      | the current instant expressed in a given zone    |
//! | [`utcnow`]      | UTC civil time                                   |
//! | [`today`]       | same as [`now_naive`]                            |
//! | [`local`]       | the host's local time (not available when frozen)|
//! | [`time`]        | seconds since the Unix epoch                     |
//!
//! Outside a freeze scope these read the system clock. Inside a scope they
//! read the frozen [`ClockState`](state::ClockState): a reference civil time in
//! a simulated timezone, optionally ticking with real elapsed time.
//!
//! ```rust,no_run
//! use freezeclock::{FreezeTime, ZoneSpec};
//! use freezeclock::zone::Fold;
//! use chrono::NaiveDate;
//!
//! // The second 01:30 of the day the clocks went back in New York.
//! let repeated = NaiveDate::from_ymd_opt(2018, 11, 4).unwrap().and_hms_opt(1, 30, 0).unwrap();
//!
//! let guard = FreezeTime::new(repeated)
//!     .timezone("America/New_York".parse::<ZoneSpec>().unwrap())
//!     .fold(Fold::Later)
//!     .enter()
//!     .unwrap();
//!
//! assert_eq!(freezeclock::time(), Ok(1_541_313_000.0));
//!
//! drop(guard);
//! ```
//!
//! Components that want to be frozen separately from the default accessors
//! read their own named target from the [`accessor`] registry, and the scope
//! installs the frozen clock there too with
//! [`FreezeTime::extra_datetime_target`] or [`FreezeTime::extra_time_target`].
//!
//! Only one scope can be active at a time; entering a second one fails with
//! [`Error::ScopeActive`].
//!
//! A scope can also be described in a TOML configuration, see
//! [`freezeclock_configuration`] and [`FreezeTime::from_config`].
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};

pub mod accessor;
pub mod error;
pub mod freeze;
pub mod logging;

#[macro_use]
extern crate lazy_static;

pub use freezeclock_clock::{clock, conv, state, zone};

pub use self::error::Error;
pub use self::freeze::{FreezeGuard, FreezeTime};
pub use self::zone::{DstTable, Fold, Timezone, ZoneSpec};
use self::accessor::{DATETIME_TARGET, TIME_TARGET};

/// The current civil time in the clock's local timezone.
///
/// # Errors
///
/// Will return `Err` if the installed clock can not be read.
pub fn now_naive() -> Result<NaiveDateTime, Error> {
    Ok(accessor::datetime_at(DATETIME_TARGET).now_naive()?)
}

/// The current instant expressed in `zone`.
///
/// # Errors
///
/// Will return `Err` if the installed clock can not be read.
pub fn now_in(zone: &dyn Timezone) -> Result<DateTime<FixedOffset>, Error> {
    Ok(accessor::datetime_at(DATETIME_TARGET).now_in(zone)?)
}

/// The current UTC civil time.
///
/// # Errors
///
/// Will return `Err` if the installed clock can not be read.
pub fn utcnow() -> Result<NaiveDateTime, Error> {
    Ok(accessor::datetime_at(DATETIME_TARGET).utcnow()?)
}

/// # Errors
///
/// Will return `Err` if the installed clock can not be read.
pub fn today() -> Result<NaiveDateTime, Error> {
    Ok(accessor::datetime_at(DATETIME_TARGET).today()?)
}

/// The current time in the host's local timezone.
///
/// # Errors
///
/// Will return `Error::Clock(NotImplemented)` inside a freeze scope.
pub fn local() -> Result<DateTime<Local>, Error> {
    Ok(accessor::datetime_at(DATETIME_TARGET).local()?)
}

/// Seconds since the Unix epoch.
///
/// # Errors
///
/// Will return `Err` if the installed clock can not be read.
pub fn time() -> Result<f64, Error> {
    Ok(accessor::time_at(TIME_TARGET).time()?)
}
