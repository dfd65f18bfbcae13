use chrono::{NaiveDate, NaiveDateTime};
use freezeclock_clock::state::ClockState;
use freezeclock_clock::zone::{Fold, ZoneSpec};

fn civil(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

fn clock_in(zone: &str, reference: NaiveDateTime, fold: Fold) -> ClockState {
    let zone = zone.parse::<ZoneSpec>().unwrap().resolve().unwrap();
    ClockState::new(reference, zone, false, fold)
}

#[test]
fn a_posix_zone_should_honor_the_fold_of_the_repeated_hour() {
    let repeated = civil(2018, 11, 4, 1, 30);

    for zone in ["posix:EST5EDT,M3.2.0,M11.1.0", "-05:00"] {
        let clock = clock_in(zone, civil(2014, 1, 1, 0, 0), Fold::Earlier);
        assert_eq!(clock.epoch_seconds().unwrap(), 1_388_552_400.0);
    }

    let earlier = clock_in("posix:EST5EDT,M3.2.0,M11.1.0", repeated, Fold::Earlier);
    let later = clock_in("posix:EST5EDT,M3.2.0,M11.1.0", repeated, Fold::Later);
    assert_eq!(earlier.epoch_seconds().unwrap(), 1_541_309_400.0);
    assert_eq!(later.epoch_seconds().unwrap(), 1_541_313_000.0);
}

#[cfg(feature = "tzdb")]
#[test]
fn a_named_zone_should_convert_the_reference_time_to_utc() {
    let clock = clock_in("America/New_York", civil(2014, 1, 1, 0, 0), Fold::Earlier);

    assert_eq!(clock.utcnow().unwrap(), civil(2014, 1, 1, 5, 0));
    assert_eq!(clock.epoch_seconds().unwrap(), 1_388_552_400.0);
}

#[cfg(feature = "tzdb")]
#[test]
fn a_named_zone_should_honor_the_fold_of_a_repeated_hour() {
    let repeated = civil(2018, 11, 4, 1, 30);

    let earlier = clock_in("America/New_York", repeated, Fold::Earlier);
    let later = clock_in("America/New_York", repeated, Fold::Later);

    assert_eq!(earlier.epoch_seconds().unwrap(), 1_541_309_400.0);
    assert_eq!(later.epoch_seconds().unwrap(), 1_541_313_000.0);
}

#[cfg(feature = "tzdb")]
#[test]
fn a_posix_zone_should_agree_with_the_tz_database_around_the_2018_transitions() {
    let references = [
        civil(2014, 1, 1, 0, 0),
        civil(2018, 3, 11, 1, 30),
        civil(2018, 3, 11, 3, 30),
        civil(2018, 11, 4, 0, 30),
        civil(2018, 11, 4, 1, 30),
        civil(2018, 11, 4, 2, 30),
    ];

    for reference in references {
        for fold in [Fold::Earlier, Fold::Later] {
            let posix = clock_in("posix:EST5EDT,M3.2.0,M11.1.0", reference, fold);
            let named = clock_in("America/New_York", reference, fold);

            assert_eq!(
                posix.epoch_seconds().unwrap(),
                named.epoch_seconds().unwrap(),
                "{reference} with {fold:?}"
            );
        }
    }
}
