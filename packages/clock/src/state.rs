//! The state of a frozen clock and the arithmetic giving its current time.
//!
//! A [`ClockState`] reads as a reference civil time in a simulated local
//! timezone. The reference is attached to the timezone with the fold once,
//! giving the instant the clock starts at. When ticking, the real time elapsed
//! since the state was created is added to that instant, and the local civil
//! time is the ticked instant re-expressed in the timezone. The clock never
//! goes back, and the local time jumps over a skipped hour or runs through a
//! repeated one the way a wall clock does.
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, Utc};

use crate::conv::{convert_from_datetime_utc_to_epoch_seconds, convert_from_datetime_utc_to_timestamp};
use crate::zone::{Fold, Timezone};
use crate::{DurationSinceUnixEpoch, Error};

/// A reading of the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading {
    /// Civil time in the simulated local timezone.
    Naive(NaiveDateTime),
    /// The instant expressed in the observed timezone.
    Aware(DateTime<FixedOffset>),
}

impl Reading {
    /// The civil time shown by the reading.
    #[must_use]
    pub fn naive_local(&self) -> NaiveDateTime {
        match self {
            Reading::Naive(local) => *local,
            Reading::Aware(observed) => observed.naive_local(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClockState {
    reference: NaiveDateTime,
    zone: Arc<dyn Timezone>,
    ticking: bool,
    fold: Fold,
    monotonic_start: Option<Instant>,
}

impl ClockState {
    /// A clock reading `reference` in `zone`. A ticking clock starts counting
    /// from now.
    #[must_use]
    pub fn new(reference: NaiveDateTime, zone: Arc<dyn Timezone>, ticking: bool, fold: Fold) -> Self {
        Self {
            reference,
            zone,
            ticking,
            fold,
            monotonic_start: ticking.then(Instant::now),
        }
    }

    #[must_use]
    pub fn reference(&self) -> NaiveDateTime {
        self.reference
    }

    #[must_use]
    pub fn zone(&self) -> &Arc<dyn Timezone> {
        &self.zone
    }

    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    #[must_use]
    pub fn fold(&self) -> Fold {
        self.fold
    }

    /// Real time elapsed since the clock started ticking, zero when frozen.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.monotonic_start.map_or(Duration::ZERO, |start| start.elapsed())
    }

    /// The current civil time in the simulated timezone. A frozen clock reads
    /// the reference as given, even when the timezone skips it.
    ///
    /// # Errors
    ///
    /// Will return `Error::OutOfRange` if the ticked time overflows.
    pub fn local_now(&self) -> Result<NaiveDateTime, Error> {
        if !self.ticking {
            return Ok(self.reference);
        }

        Ok(self.zone.convert(&self.instant()?).naive_local())
    }

    /// The current time, as naive civil time when `observe` is `None` or as
    /// the absolute instant expressed in `observe` otherwise.
    ///
    /// # Errors
    ///
    /// Will return `Error::OutOfRange` if the time can not be represented.
    pub fn now(&self, observe: Option<&dyn Timezone>) -> Result<Reading, Error> {
        match observe {
            None => self.local_now().map(Reading::Naive),
            Some(zone) => self.now_in(zone).map(Reading::Aware),
        }
    }

    /// # Errors
    ///
    /// Will return `Error::OutOfRange` if the time can not be represented.
    pub fn now_naive(&self) -> Result<NaiveDateTime, Error> {
        self.local_now()
    }

    /// # Errors
    ///
    /// Will return `Error::OutOfRange` if the time can not be represented.
    pub fn now_in(&self, observe: &dyn Timezone) -> Result<DateTime<FixedOffset>, Error> {
        Ok(observe.convert(&self.instant()?))
    }

    /// The absolute instant the clock reads.
    ///
    /// # Errors
    ///
    /// Will return `Error::OutOfRange` if the time can not be represented.
    pub fn instant(&self) -> Result<DateTime<Utc>, Error> {
        let elapsed = TimeDelta::from_std(self.elapsed()).map_err(|_| Error::OutOfRange)?;

        self.zone
            .attach(&self.reference, self.fold)?
            .checked_add_signed(elapsed)
            .ok_or(Error::OutOfRange)
    }

    /// The current UTC civil time, without zone annotation.
    ///
    /// # Errors
    ///
    /// Will return `Error::OutOfRange` if the time can not be represented.
    pub fn utcnow(&self) -> Result<NaiveDateTime, Error> {
        Ok(self.instant()?.naive_utc())
    }

    /// # Errors
    ///
    /// Will return `Error::OutOfRange` if the time can not be represented.
    pub fn today(&self) -> Result<NaiveDateTime, Error> {
        self.now_naive()
    }

    /// Seconds since the Unix epoch, with microseconds as the fraction.
    ///
    /// # Errors
    ///
    /// Will return `Error::OutOfRange` if the time can not be represented.
    pub fn epoch_seconds(&self) -> Result<f64, Error> {
        Ok(convert_from_datetime_utc_to_epoch_seconds(&self.instant()?))
    }

    /// # Errors
    ///
    /// Will return `Error::BeforeUnixEpoch` if the clock reads a time before
    /// 1970.
    pub fn epoch_duration(&self) -> Result<DurationSinceUnixEpoch, Error> {
        convert_from_datetime_utc_to_timestamp(&self.instant()?)
    }
}
