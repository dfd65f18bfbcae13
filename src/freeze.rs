//! Freeze scopes.
//!
//! A [`FreezeTime`] describes the clock a scope reads: the civil time it
//! starts at, the simulated timezone that civil time is read in, the fold for
//! ambiguous civil times and whether it ticks. Entering it sets the frozen
//! [`ClockState`] and installs the [`Frozen`] clock at the default targets
//! plus any extra ones. The returned [`FreezeGuard`] undoes all of it when it
//! is dropped, also while a panic unwinds.
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use freezeclock::{FreezeTime, ZoneSpec};
//!
//! let new_year = NaiveDate::from_ymd_opt(2014, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//!
//! let seconds = FreezeTime::new(new_year)
//!     .timezone("America/New_York".parse::<ZoneSpec>().unwrap())
//!     .run(freezeclock::time)
//!     .unwrap();
//!
//! assert_eq!(seconds, Ok(1_388_552_400.0));
//! ```
use std::sync::Arc;

use chrono::NaiveDateTime;
use freezeclock_clock::clock::Frozen;
use freezeclock_clock::conv::parse_civil_time;
use freezeclock_clock::state::ClockState;
use freezeclock_clock::zone::{Fold, Timezone, ZoneSpec};
use freezeclock_configuration::validator::Validator;
use freezeclock_configuration::Freeze;
use tracing::{info, warn};

use crate::accessor::{self, Accessor, PatchToken, DATETIME_TARGET, TIME_TARGET};
use crate::Error;

#[derive(Debug, Clone)]
enum Zone {
    Spec(ZoneSpec),
    Resolved(Arc<dyn Timezone>),
}

/// The parameters of a freeze scope.
#[derive(Debug, Clone)]
pub struct FreezeTime {
    reference: NaiveDateTime,
    zone: Zone,
    ticking: bool,
    fold: Fold,
    extra_datetime_targets: Vec<String>,
    extra_time_targets: Vec<String>,
}

impl FreezeTime {
    /// A scope frozen at `reference` read in UTC.
    #[must_use]
    pub fn new(reference: NaiveDateTime) -> Self {
        Self {
            reference,
            zone: Zone::Spec(ZoneSpec::Utc),
            ticking: false,
            fold: Fold::Earlier,
            extra_datetime_targets: Vec::new(),
            extra_time_targets: Vec::new(),
        }
    }

    /// The zone the reference civil time is read in. It is resolved when the
    /// scope is entered.
    #[must_use]
    pub fn timezone(mut self, zone: ZoneSpec) -> Self {
        self.zone = Zone::Spec(zone);
        self
    }

    /// Like [`FreezeTime::timezone`] with an already built zone, for example a
    /// [`DstTable`](freezeclock_clock::zone::DstTable) with custom transitions.
    #[must_use]
    pub fn zone(mut self, zone: Arc<dyn Timezone>) -> Self {
        self.zone = Zone::Resolved(zone);
        self
    }

    #[must_use]
    pub fn tick(mut self, ticking: bool) -> Self {
        self.ticking = ticking;
        self
    }

    #[must_use]
    pub fn fold(mut self, fold: Fold) -> Self {
        self.fold = fold;
        self
    }

    /// Also installs the frozen date-time accessor at `target`.
    #[must_use]
    pub fn extra_datetime_target(mut self, target: impl Into<String>) -> Self {
        self.extra_datetime_targets.push(target.into());
        self
    }

    /// Also installs the frozen epoch seconds accessor at `target`.
    #[must_use]
    pub fn extra_time_target(mut self, target: impl Into<String>) -> Self {
        self.extra_time_targets.push(target.into());
        self
    }

    /// Builds the scope described by a `[freeze]` configuration section.
    ///
    /// # Errors
    ///
    /// Will return `Error::InvalidConfiguration` if the section does not pass
    /// validation, and a clock error if the instant is not a civil time or the
    /// timezone text is malformed.
    pub fn from_config(config: &Freeze) -> Result<Self, Error> {
        config.validate()?;

        let reference = parse_civil_time(&config.instant)?;
        let zone: ZoneSpec = config.timezone.parse()?;
        let fold = Fold::try_from(config.fold)?;

        let scope = config
            .extra_datetime_targets
            .iter()
            .fold(Self::new(reference), |scope, target| scope.extra_datetime_target(target.as_str()));

        let scope = config
            .extra_time_targets
            .iter()
            .fold(scope, |scope, target| scope.extra_time_target(target.as_str()));

        Ok(scope.timezone(zone).tick(config.tick).fold(fold))
    }

    /// Enters the scope.
    ///
    /// # Errors
    ///
    /// Will return `Error::ScopeActive` if another scope is active, a clock
    /// error if the timezone can not be resolved, and the registry error if an
    /// accessor can not be installed. Nothing stays installed on error.
    pub fn enter(&self) -> Result<FreezeGuard, Error> {
        if Frozen::is_set() {
            return Err(Error::ScopeActive);
        }

        let zone = match &self.zone {
            Zone::Spec(spec) => spec.resolve()?,
            Zone::Resolved(zone) => zone.clone(),
        };

        info!(
            reference = %self.reference,
            zone = %zone.name(),
            ticking = self.ticking,
            fold = u8::from(self.fold),
            "entering freeze scope"
        );

        Frozen::set(ClockState::new(self.reference, zone, self.ticking, self.fold));

        let mut guard = FreezeGuard { patches: Vec::new() };

        let datetime_targets = std::iter::once(DATETIME_TARGET).chain(self.extra_datetime_targets.iter().map(String::as_str));
        for target in datetime_targets {
            guard.patches.push(accessor::install(target, Accessor::DateTime(Arc::new(Frozen)))?);
        }

        let time_targets = std::iter::once(TIME_TARGET).chain(self.extra_time_targets.iter().map(String::as_str));
        for target in time_targets {
            guard.patches.push(accessor::install(target, Accessor::Epoch(Arc::new(Frozen)))?);
        }

        Ok(guard)
    }

    /// Runs `f` inside the scope and returns its value.
    ///
    /// # Errors
    ///
    /// Will return the error of [`FreezeTime::enter`]. `f` is not run then.
    pub fn run<T>(&self, f: impl FnOnce() -> T) -> Result<T, Error> {
        let guard = self.enter()?;
        let value = f();
        guard.exit();
        Ok(value)
    }
}

/// An active freeze scope. Dropping it exits the scope.
#[must_use = "the scope exits as soon as the guard is dropped"]
#[derive(Debug)]
pub struct FreezeGuard {
    patches: Vec<PatchToken>,
}

impl FreezeGuard {
    /// The targets of the installed accessors, in installation order.
    #[must_use]
    pub fn installed_targets(&self) -> Vec<&str> {
        self.patches.iter().map(PatchToken::target).collect()
    }

    /// Exits the scope now instead of when the guard goes out of scope.
    pub fn exit(self) {
        drop(self);
    }
}

impl Drop for FreezeGuard {
    fn drop(&mut self) {
        while let Some(token) = self.patches.pop() {
            accessor::restore(token);
        }

        if Frozen::clear().is_none() {
            warn!("the frozen clock state was cleared before the scope exited");
        }

        info!("exited freeze scope");
    }
}
