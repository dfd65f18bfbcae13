use std::thread;
use std::time::Duration;

use freezeclock::accessor;
use freezeclock::FreezeTime;
use freezeclock_configuration::{Configuration, Info};
use freezeclock_test_helpers::{configuration, fixture, random};
use serial_test::serial;

#[test]
#[serial]
fn a_scope_should_freeze_the_extra_targets_named_in_the_configuration() {
    let target = random::target("tests::time");

    let mut config = configuration::ephemeral_frozen_at("2014-01-01T00:00:00", "UTC");
    config.freeze.extra_time_targets.push(target.clone());

    freezeclock::logging::setup(&config);
    let guard = FreezeTime::from_config(&config.freeze).unwrap().enter().unwrap();

    assert_eq!(accessor::time_at(&target).time(), Ok(fixture::NEW_YEAR_2014_UTC_TIMESTAMP));

    drop(guard);

    assert!(!accessor::is_patched(&target));
}

#[test]
#[serial]
fn a_scope_should_be_loaded_from_a_toml_document_and_the_environment() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "freezeclock.toml",
            r#"
            [logging]
            threshold = "off"

            [freeze]
            instant = "2018-11-04T01:30:00"
            timezone = "posix:EST5EDT,M3.2.0,M11.1.0"
            "#,
        )?;
        jail.set_env("FREEZECLOCK_FREEZE.FOLD", "1");

        let config = Configuration::load(&Info::new("freezeclock.toml".to_owned()).unwrap()).unwrap();

        let seconds = FreezeTime::from_config(&config.freeze).unwrap().run(freezeclock::time).unwrap();

        assert_eq!(seconds, Ok(fixture::REPEATED_HOUR_LATER_TIMESTAMP));

        Ok(())
    });
}

fn assert_ticks_forward_across_the_skipped_hour(timezone: &str) {
    let config = configuration::ephemeral_ticking_from("2018-03-11T01:59:59.900", timezone);

    let guard = FreezeTime::from_config(&config.freeze).unwrap().enter().unwrap();

    let first = freezeclock::time().unwrap();
    thread::sleep(Duration::from_millis(200));
    let second = freezeclock::time().unwrap();
    let local = freezeclock::now_naive().unwrap();

    drop(guard);

    assert!(second - first >= 0.199, "{timezone}: the clock went from {first} to {second}");
    assert!(second - first < 5.0, "{timezone}: the clock went from {first} to {second}");
    assert!(local >= fixture::civil(2018, 3, 11, 3, 0, 0), "{timezone}: local time {local}");
}

#[test]
#[serial]
fn a_ticking_scope_should_run_forward_across_the_skipped_hour() {
    assert_ticks_forward_across_the_skipped_hour("posix:EST5EDT,M3.2.0,M11.1.0");
}

#[cfg(feature = "tzdb")]
#[test]
#[serial]
fn a_ticking_scope_in_a_named_zone_should_run_forward_across_the_skipped_hour() {
    assert_ticks_forward_across_the_skipped_hour("America/New_York");
}
