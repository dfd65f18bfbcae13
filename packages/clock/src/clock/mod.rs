//! The clocks behind the date-time and epoch seconds accessors.
//!
//! - [`Working`]: the system clock. Used wherever no freeze scope is active.
//! - [`Frozen`]: reads the process-wide [`ClockState`](crate::state::ClockState)
//!   installed by a freeze scope.
use std::fmt::Debug;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};

use crate::zone::Timezone;
use crate::Error;

pub mod frozen;
pub mod working;

pub use self::frozen::Frozen;
pub use self::working::Working;

/// The "current date-time" accessor.
pub trait DateTimeSource: Send + Sync + Debug {
    /// The current civil time in the clock's local timezone.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the clock can not be read.
    fn now_naive(&self) -> Result<NaiveDateTime, Error>;

    /// The current instant expressed in `observe`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the clock can not be read.
    fn now_in(&self, observe: &dyn Timezone) -> Result<DateTime<FixedOffset>, Error>;

    /// The current UTC civil time.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the clock can not be read.
    fn utcnow(&self) -> Result<NaiveDateTime, Error> {
        Ok(self.now_in(&Utc)?.naive_utc())
    }

    /// # Errors
    ///
    /// Will return `Err` if the clock can not be read.
    fn today(&self) -> Result<NaiveDateTime, Error> {
        self.now_naive()
    }

    /// The current time in the host's own local timezone.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the clock can not be read.
    fn local(&self) -> Result<DateTime<Local>, Error>;

    fn dbg_clock_type(&self) -> String;
}

/// The "current epoch seconds" accessor.
pub trait EpochSource: Send + Sync + Debug {
    /// Seconds since the Unix epoch with a fractional part.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the clock can not be read.
    fn time(&self) -> Result<f64, Error>;

    fn dbg_clock_type(&self) -> String;
}
