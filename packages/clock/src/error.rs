use thiserror::Error;

/// Errors raised while reading or configuring a clock.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The frozen clock was read outside of a freeze scope.
    #[error("the frozen clock is not initialized, enter a freeze scope first")]
    Uninitialized,

    /// The accessor has no meaning for a frozen clock.
    #[error("`{0}` is not implemented for the frozen clock")]
    NotImplemented(&'static str),

    /// A named timezone was requested but the tz database is not compiled in.
    #[error("timezone `{0}` needs the tz database, enable the `tzdb` feature")]
    TimezoneUnavailable(String),

    #[error("unknown timezone `{0}`")]
    UnknownTimezone(String),

    #[error("invalid UTC offset `{0}`")]
    InvalidOffset(String),

    #[error("invalid POSIX TZ rule `{0}`")]
    InvalidPosixRule(String),

    #[error("DST transitions must be in strictly ascending order")]
    InvalidTransitions,

    #[error("invalid fold `{0}`, expected 0 or 1")]
    InvalidFold(u8),

    #[error("invalid civil time `{0}`")]
    InvalidCivilTime(String),

    #[error("date-time arithmetic out of range")]
    OutOfRange,

    #[error("the instant is before the Unix epoch")]
    BeforeUnixEpoch,
}
