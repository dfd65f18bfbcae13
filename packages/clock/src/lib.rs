//! Time related functions and types for a clock that can be frozen.
//!
//! Tests usually want to control where the time comes from, so that the
//! "current time" read by the code under test is deterministic. This crate
//! provides the pieces needed for that:
//!
//! - [`state::ClockState`]: a reference civil time in a simulated timezone,
//!   optionally ticking forward with real elapsed time.
//! - [`zone::Timezone`]: the one capability the clock needs from a timezone,
//!   resolving a civil time into an absolute instant given a [`zone::Fold`]
//!   preference. Adapters exist for `Utc`, `FixedOffset`, `chrono_tz::Tz`
//!   (feature `tzdb`) and the DST table zone [`zone::DstTable`].
//! - [`clock`]: the working (system) clock and the process-wide frozen clock,
//!   both exposed through the [`clock::DateTimeSource`] and
//!   [`clock::EpochSource`] accessors.
//!
//! ```text
//! Frozen at:      2018-11-04 01:30:00 (America/New_York, fold = 0)
//! Resolves to:    2018-11-04 01:30:00 EDT (-04:00)
//! Universal time: 2018-11-04 05:30:00 UTC
//! Timestamp:      1541309400
//! ```
//!
//! > **NOTICE**: a civil time inside a DST transition is ambiguous (the clock
//! > was turned back) or missing (the clock was turned forward). The fold
//! > decides which of the two possible instants is meant.
//!
//! Epoch timestamps use the type [`DurationSinceUnixEpoch`], a
//! `std::time::Duration` since the Unix Epoch, as well as `f64` seconds for
//! the epoch seconds accessor.
pub mod clock;
pub mod conv;
pub mod error;
pub mod state;
pub mod zone;

#[macro_use]
extern crate lazy_static;

pub use error::Error;

/// Duration since the Unix Epoch.
pub type DurationSinceUnixEpoch = std::time::Duration;
