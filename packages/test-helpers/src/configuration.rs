use freezeclock_configuration::{Configuration, Threshold};

/// This configuration is used for testing. It freezes the clock at the Unix
/// epoch in UTC and does not log.
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Off; // Change to `debug` for tests debugging

    config
}

/// A testing configuration frozen at `instant` (`2014-01-01T00:00:00`) in
/// `timezone` (`America/New_York`).
#[must_use]
pub fn ephemeral_frozen_at(instant: &str, timezone: &str) -> Configuration {
    let mut config = ephemeral();

    config.freeze.instant = instant.to_owned();
    config.freeze.timezone = timezone.to_owned();

    config
}

/// A testing configuration like [`ephemeral_frozen_at`] with a ticking clock.
#[must_use]
pub fn ephemeral_ticking_from(instant: &str, timezone: &str) -> Configuration {
    let mut config = ephemeral_frozen_at(instant, timezone);

    config.freeze.tick = true;

    config
}
