mod configuration;

use std::panic;
use std::thread;
use std::time::Duration;

use chrono::{Duration as CivilDuration, Utc};
use freezeclock::accessor::{self, DATETIME_TARGET, TIME_TARGET};
use freezeclock::{Error, Fold, FreezeTime, ZoneSpec};
use freezeclock_test_helpers::fixture;
use serial_test::serial;
use tracing::level_filters::LevelFilter;

use crate::common::logging::{tracing_stderr_init, INIT};

fn zone(text: &str) -> ZoneSpec {
    text.parse().unwrap()
}

#[test]
#[serial]
fn a_frozen_clock_should_read_the_same_time_on_every_call() {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    let _guard = FreezeTime::new(fixture::new_year_2014()).enter().unwrap();

    let first = freezeclock::now_in(&Utc).unwrap();
    thread::sleep(Duration::from_millis(10));
    let second = freezeclock::now_in(&Utc).unwrap();

    assert_eq!(first, second);
    assert_eq!(freezeclock::now_naive().unwrap(), fixture::new_year_2014());
    assert_eq!(freezeclock::today().unwrap(), fixture::new_year_2014());
}

#[test]
#[serial]
fn a_ticking_clock_should_advance_with_the_elapsed_time() {
    let _guard = FreezeTime::new(fixture::new_year_2014()).tick(true).enter().unwrap();

    let first = freezeclock::utcnow().unwrap();
    thread::sleep(Duration::from_millis(50));
    let second = freezeclock::utcnow().unwrap();

    let elapsed = second - first;
    assert!(first >= fixture::new_year_2014());
    assert!(elapsed >= CivilDuration::milliseconds(50));
    assert!(elapsed < CivilDuration::seconds(5));
}

#[test]
#[serial]
fn utcnow_should_be_the_reference_time_when_frozen_in_utc() {
    let _guard = FreezeTime::new(fixture::new_year_2014()).enter().unwrap();

    assert_eq!(freezeclock::utcnow().unwrap(), fixture::new_year_2014());
    assert_eq!(freezeclock::time(), Ok(fixture::NEW_YEAR_2014_UTC_TIMESTAMP));
}

#[test]
#[serial]
fn the_host_local_time_should_not_be_available_while_frozen() {
    let _guard = FreezeTime::new(fixture::new_year_2014()).enter().unwrap();

    assert_eq!(
        freezeclock::local(),
        Err(Error::Clock(freezeclock_clock::Error::NotImplemented("Frozen::local")))
    );
}

#[test]
#[serial]
fn a_posix_zone_should_honor_the_fold_of_the_repeated_hour() {
    let posix = zone(&format!("posix:{}", fixture::US_EASTERN_POSIX_RULE));

    let earlier = FreezeTime::new(fixture::repeated_hour_2018())
        .timezone(posix.clone())
        .run(freezeclock::time)
        .unwrap();
    let later = FreezeTime::new(fixture::repeated_hour_2018())
        .timezone(posix)
        .fold(Fold::Later)
        .run(freezeclock::time)
        .unwrap();

    assert_eq!(earlier, Ok(fixture::REPEATED_HOUR_EARLIER_TIMESTAMP));
    assert_eq!(later, Ok(fixture::REPEATED_HOUR_LATER_TIMESTAMP));
}

#[test]
#[serial]
fn a_skipped_reference_time_should_be_read_as_given_and_resolved_by_fold() {
    let posix = zone(&format!("posix:{}", fixture::US_EASTERN_POSIX_RULE));

    let earlier = FreezeTime::new(fixture::skipped_hour_2018())
        .timezone(posix.clone())
        .run(|| (freezeclock::now_naive(), freezeclock::time()))
        .unwrap();
    let later = FreezeTime::new(fixture::skipped_hour_2018())
        .timezone(posix)
        .fold(Fold::Later)
        .run(freezeclock::time)
        .unwrap();

    assert_eq!(earlier.0, Ok(fixture::skipped_hour_2018()));
    assert_eq!(earlier.1, Ok(1_520_749_800.0));
    assert_eq!(later, Ok(1_520_753_400.0));
}

#[cfg(feature = "tzdb")]
#[test]
#[serial]
fn a_named_zone_should_convert_the_reference_time_to_utc() {
    let _guard = FreezeTime::new(fixture::new_year_2014())
        .timezone(zone("America/New_York"))
        .enter()
        .unwrap();

    assert_eq!(freezeclock::utcnow().unwrap(), fixture::civil(2014, 1, 1, 5, 0, 0));
    assert_eq!(freezeclock::time(), Ok(fixture::NEW_YEAR_2014_NEW_YORK_TIMESTAMP));
    assert_eq!(freezeclock::now_naive().unwrap(), fixture::new_year_2014());
}

#[cfg(feature = "tzdb")]
#[test]
#[serial]
fn a_named_zone_should_honor_the_fold_of_the_repeated_hour() {
    let earlier = FreezeTime::new(fixture::repeated_hour_2018())
        .timezone(zone("America/New_York"))
        .fold(Fold::Earlier)
        .run(freezeclock::time)
        .unwrap();
    let later = FreezeTime::new(fixture::repeated_hour_2018())
        .timezone(zone("America/New_York"))
        .fold(Fold::Later)
        .run(freezeclock::time)
        .unwrap();

    assert_eq!(earlier, Ok(fixture::REPEATED_HOUR_EARLIER_TIMESTAMP));
    assert_eq!(later, Ok(fixture::REPEATED_HOUR_LATER_TIMESTAMP));
}

#[cfg(feature = "tzdb")]
#[test]
#[serial]
fn the_current_instant_should_be_expressible_in_another_zone() {
    let _guard = FreezeTime::new(fixture::new_year_2014())
        .timezone(zone("America/New_York"))
        .enter()
        .unwrap();

    let madrid = zone("Europe/Madrid").resolve().unwrap();
    let in_madrid = freezeclock::now_in(madrid.as_ref()).unwrap();

    assert_eq!(in_madrid.naive_local(), fixture::civil(2014, 1, 1, 6, 0, 0));
    assert_eq!(in_madrid.offset().local_minus_utc(), 3600);
}

#[test]
#[serial]
fn the_real_clock_should_be_read_again_after_the_scope_exits() {
    FreezeTime::new(fixture::new_year_2014()).enter().unwrap().exit();

    assert!(freezeclock::utcnow().unwrap() > fixture::sentinel_2016());
    assert!(freezeclock::time().unwrap() > 1_451_606_400.0);
    assert!(freezeclock::local().is_ok());
}

#[test]
#[serial]
fn a_panic_inside_the_scope_should_restore_the_real_clock() {
    let result = panic::catch_unwind(|| {
        let _guard = FreezeTime::new(fixture::new_year_2014()).enter().unwrap();
        panic!("the code under test failed");
    });

    assert!(result.is_err());
    assert!(!accessor::is_patched(DATETIME_TARGET));
    assert!(!accessor::is_patched(TIME_TARGET));
    assert!(freezeclock::utcnow().unwrap() > fixture::sentinel_2016());
}

#[test]
#[serial]
fn a_second_scope_should_be_entered_after_the_first_one_exits() {
    FreezeTime::new(fixture::new_year_2014()).enter().unwrap().exit();

    let guard = FreezeTime::new(fixture::sentinel_2016()).enter().unwrap();

    assert_eq!(freezeclock::utcnow().unwrap(), fixture::sentinel_2016());
    drop(guard);
}
