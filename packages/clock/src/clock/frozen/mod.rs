use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use tracing::debug;

use crate::clock::{DateTimeSource, EpochSource};
use crate::state::ClockState;
use crate::zone::Timezone;
use crate::Error;

/// The clock reading the process-wide frozen [`ClockState`].
///
/// There is at most one state per process. It is set when a freeze scope is
/// entered and cleared when the scope exits. Reading the clock while no state
/// is set fails with `Error::Uninitialized`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Frozen;

impl Frozen {
    /// It sets the process-wide state, returning the one it replaces.
    pub fn set(state: ClockState) -> Option<ClockState> {
        debug!(reference = %state.reference(), zone = %state.zone().name(), "setting the frozen clock state");
        detail::STATE.write().replace(state)
    }

    /// It clears the process-wide state, returning it.
    pub fn clear() -> Option<ClockState> {
        debug!("clearing the frozen clock state");
        detail::STATE.write().take()
    }

    #[must_use]
    pub fn is_set() -> bool {
        detail::STATE.read().is_some()
    }

    /// Runs `read` on the current state.
    ///
    /// # Errors
    ///
    /// Will return `Error::Uninitialized` if there is no state, or the error
    /// returned by `read`.
    pub fn with_state<T>(read: impl FnOnce(&ClockState) -> Result<T, Error>) -> Result<T, Error> {
        detail::STATE.read().as_ref().map_or(Err(Error::Uninitialized), read)
    }
}

impl DateTimeSource for Frozen {
    fn now_naive(&self) -> Result<NaiveDateTime, Error> {
        Self::with_state(ClockState::now_naive)
    }

    fn now_in(&self, observe: &dyn Timezone) -> Result<DateTime<FixedOffset>, Error> {
        Self::with_state(|state| state.now_in(observe))
    }

    fn utcnow(&self) -> Result<NaiveDateTime, Error> {
        Self::with_state(ClockState::utcnow)
    }

    fn today(&self) -> Result<NaiveDateTime, Error> {
        Self::with_state(ClockState::today)
    }

    /// The simulated timezone is not the host's, so there is no frozen
    /// `Local` time.
    fn local(&self) -> Result<DateTime<Local>, Error> {
        Err(Error::NotImplemented("Frozen::local"))
    }

    fn dbg_clock_type(&self) -> String {
        "Frozen".to_owned()
    }
}

impl EpochSource for Frozen {
    fn time(&self) -> Result<f64, Error> {
        Self::with_state(ClockState::epoch_seconds)
    }

    fn dbg_clock_type(&self) -> String {
        "Frozen".to_owned()
    }
}


mod detail {
    use parking_lot::RwLock;

    use crate::state::ClockState;

    lazy_static! {
        pub static ref STATE: RwLock<Option<ClockState>> = RwLock::new(None);
    }
}
