//! Timezones described by a table of DST transitions.
//!
//! A [`DstTable`] starts in an initial [`Period`] and switches to a new period
//! at every [`Transition`] instant. Localizing a civil time takes an `is_dst`
//! hint that picks between interpretations when the civil time is repeated or
//! skipped.
//!
//! Tables can be built from a POSIX TZ rule:
//!
//! ```rust
//! use freezeclock_clock::zone::DstTable;
//!
//! let eastern = DstTable::from_posix("EST5EDT,M3.2.0,M11.1.0", 2000..=2030).unwrap();
//! ```
use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone, Utc};

use super::{local_to_utc, Fold, Timezone};
use crate::Error;

/// A span of time with a single offset from UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub offset: FixedOffset,
    pub is_dst: bool,
    pub abbreviation: String,
}

/// The instant a new [`Period`] takes effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub at: DateTime<Utc>,
    pub period: Period,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DstTable {
    name: String,
    initial: Period,
    transitions: Vec<Transition>,
}

impl DstTable {
    /// # Errors
    ///
    /// Will return `Error::InvalidTransitions` if `transitions` are not in
    /// strictly ascending order.
    pub fn new(name: impl Into<String>, initial: Period, transitions: Vec<Transition>) -> Result<Self, Error> {
        if transitions.windows(2).any(|pair| pair[0].at >= pair[1].at) {
            return Err(Error::InvalidTransitions);
        }

        Ok(Self {
            name: name.into(),
            initial,
            transitions,
        })
    }

    /// Builds a table applying a POSIX TZ rule to every year in `years`.
    ///
    /// Only the `Mm.w.d[/time]` form of the start and end dates is supported.
    /// A rule without a DST part gives a table with no transitions.
    ///
    /// # Errors
    ///
    /// Will return `Error::InvalidPosixRule` if the rule can not be parsed.
    pub fn from_posix(rule: &str, years: RangeInclusive<i32>) -> Result<Self, Error> {
        let mut cursor = Cursor::new(rule);

        let abbreviation = cursor.name()?.to_owned();
        // POSIX offsets count hours west of Greenwich.
        let west = cursor.hms()?;
        let standard = Period {
            offset: cursor.offset(-west)?,
            is_dst: false,
            abbreviation,
        };

        if cursor.is_empty() {
            return Self::new(rule, standard, Vec::new());
        }

        let abbreviation = cursor.name()?.to_owned();
        let offset = if cursor.rest.starts_with(',') {
            cursor.offset(standard.offset.local_minus_utc() + 3600)?
        } else {
            let west = cursor.hms()?;
            cursor.offset(-west)?
        };
        let daylight = Period {
            offset,
            is_dst: true,
            abbreviation,
        };

        cursor.expect(',')?;
        let start = cursor.date_rule()?;
        cursor.expect(',')?;
        let end = cursor.date_rule()?;
        if !cursor.is_empty() {
            return Err(cursor.error());
        }

        let mut transitions = Vec::new();
        for year in years {
            let begins = start.local_datetime(year).ok_or_else(|| cursor.error())?;
            let ends = end.local_datetime(year).ok_or_else(|| cursor.error())?;

            // Each rule is stated in the local time in effect before it applies.
            transitions.push(Transition {
                at: local_to_utc(&begins, standard.offset)?,
                period: daylight.clone(),
            });
            transitions.push(Transition {
                at: local_to_utc(&ends, daylight.offset)?,
                period: standard.clone(),
            });
        }
        transitions.sort_by_key(|transition| transition.at);

        let initial = match transitions.first() {
            Some(first) if !first.period.is_dst => daylight,
            _ => standard,
        };

        Self::new(rule, initial, transitions)
    }

    /// The period in effect at an absolute instant.
    #[must_use]
    pub fn period_at(&self, instant: &DateTime<Utc>) -> &Period {
        match self.transitions.partition_point(|transition| transition.at <= *instant) {
            0 => &self.initial,
            index => &self.transitions[index - 1].period,
        }
    }

    /// Localizes a civil time, using `is_dst` to choose between a repeated or
    /// skipped civil time's interpretations.
    ///
    /// # Errors
    ///
    /// Will return `Error::OutOfRange` if the instant can not be represented.
    pub fn localize(&self, local: &NaiveDateTime, is_dst: bool) -> Result<DateTime<Utc>, Error> {
        let interpretations = self.interpretations(local)?;

        match interpretations.as_slice() {
            [(only, _)] => Ok(*only),
            [] => {
                let (before, after) = self.surrounding(local)?;
                let period = if after.is_dst == is_dst { after } else { before };
                local_to_utc(local, period.offset)
            }
            [(first, _), ..] => Ok(interpretations
                .iter()
                .find(|(_, period)| period.is_dst == is_dst)
                .map_or(*first, |(instant, _)| *instant)),
        }
    }

    /// Decides the DST state of `local` from a fold preference.
    ///
    /// `Fold::Later` takes whichever assumption, DST or not, gives the later
    /// instant and `Fold::Earlier` the one giving the earlier instant. This is
    /// the same for repeated and skipped civil times. When both assumptions
    /// agree the result is irrelevant: either the civil time is not ambiguous,
    /// or its readings share a DST state and only the fold order of
    /// [`Timezone::attach`] tells them apart.
    ///
    /// # Errors
    ///
    /// Will return `Error::OutOfRange` if the instant can not be represented.
    pub fn dst_from_fold(&self, local: &NaiveDateTime, fold: Fold) -> Result<bool, Error> {
        let inside = self.localize(local, true)?;
        let outside = self.localize(local, false)?;

        Ok(match fold {
            Fold::Later => inside > outside,
            Fold::Earlier => inside < outside,
        })
    }

    /// Every valid reading of `local`, in ascending order.
    fn interpretations(&self, local: &NaiveDateTime) -> Result<Vec<(DateTime<Utc>, &Period)>, Error> {
        let (low, high) = window(local)?;

        let mut candidates = vec![self.period_at(&low)];
        candidates.extend(
            self.transitions
                .iter()
                .filter(|transition| transition.at > low && transition.at <= high)
                .map(|transition| &transition.period),
        );

        let mut found: Vec<(DateTime<Utc>, &Period)> = Vec::new();
        for period in candidates {
            let instant = local_to_utc(local, period.offset)?;
            if self.period_at(&instant) == period && !found.iter().any(|(seen, _)| *seen == instant) {
                found.push((instant, period));
            }
        }
        found.sort_by_key(|(instant, _)| *instant);

        Ok(found)
    }

    /// The periods on either side of the transition near `local`.
    fn surrounding(&self, local: &NaiveDateTime) -> Result<(&Period, &Period), Error> {
        let (low, high) = window(local)?;
        Ok((self.period_at(&low), self.period_at(&high)))
    }
}

impl Timezone for DstTable {
    /// Picks the earlier or later reading of a repeated or skipped civil time
    /// by fold. This is `localize(local, dst_from_fold(local, fold))` whenever
    /// the two readings differ in DST state, and still honors the fold when
    /// they do not, as at a change of standard offset.
    fn attach(&self, local: &NaiveDateTime, fold: Fold) -> Result<DateTime<Utc>, Error> {
        let interpretations = self.interpretations(local)?;

        let (earliest, latest) = match (interpretations.first(), interpretations.last()) {
            (Some((earliest, _)), Some((latest, _))) => (*earliest, *latest),
            _ => {
                let (before, after) = self.surrounding(local)?;
                let read_before = local_to_utc(local, before.offset)?;
                let read_after = local_to_utc(local, after.offset)?;
                (read_before.min(read_after), read_before.max(read_after))
            }
        };

        Ok(match fold {
            Fold::Earlier => earliest,
            Fold::Later => latest,
        })
    }

    fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        self.period_at(instant).offset
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

/// A day either side of `local` read as UTC. Wide enough to hold every
/// instant `local` can denote, whatever the offset.
fn window(local: &NaiveDateTime) -> Result<(DateTime<Utc>, DateTime<Utc>), Error> {
    let probe = Utc.from_utc_datetime(local);
    let low = probe.checked_sub_days(Days::new(1)).ok_or(Error::OutOfRange)?;
    let high = probe.checked_add_days(Days::new(1)).ok_or(Error::OutOfRange)?;
    Ok((low, high))
}

/// `Mm.w.d/time`: day `d` (0 is Sunday) of week `w` (5 is the last) of month
/// `m`, at `time` seconds past local midnight.
#[derive(Debug, Clone, Copy)]
struct DateRule {
    month: u32,
    week: u32,
    weekday: u32,
    time: i32,
}

impl DateRule {
    fn local_datetime(self, year: i32) -> Option<NaiveDateTime> {
        let first = NaiveDate::from_ymd_opt(year, self.month, 1)?;
        let lead = (self.weekday + 7 - first.weekday().num_days_from_sunday()) % 7;

        let mut day = 1 + lead + (self.week - 1) * 7;
        let mut date = NaiveDate::from_ymd_opt(year, self.month, day);
        while date.is_none() && day > 7 {
            day -= 7;
            date = NaiveDate::from_ymd_opt(year, self.month, day);
        }

        date?
            .and_hms_opt(0, 0, 0)?
            .checked_add_signed(TimeDelta::try_seconds(i64::from(self.time))?)
    }
}

struct Cursor<'a> {
    rule: &'a str,
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(rule: &'a str) -> Self {
        Self { rule, rest: rule.trim() }
    }

    fn error(&self) -> Error {
        Error::InvalidPosixRule(self.rule.to_owned())
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    fn eat(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, c: char) -> Result<(), Error> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    /// `EST` or the quoted form `<+0330>`.
    fn name(&mut self) -> Result<&'a str, Error> {
        let (name, rest) = if self.eat('<') {
            let quoted = self.rest;
            let end = quoted.find('>').ok_or_else(|| self.error())?;
            (&quoted[..end], &quoted[end + 1..])
        } else {
            let plain = self.rest;
            let end = plain.find(|c: char| !c.is_ascii_alphabetic()).unwrap_or(plain.len());
            if end < 3 {
                return Err(self.error());
            }
            plain.split_at(end)
        };

        if name.is_empty() {
            return Err(self.error());
        }
        self.rest = rest;
        Ok(name)
    }

    fn number(&mut self) -> Result<u32, Error> {
        let text = self.rest;
        let end = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
        let (digits, rest) = text.split_at(end);
        let number = digits.parse().map_err(|_| self.error())?;
        self.rest = rest;
        Ok(number)
    }

    /// `[+-]hh[:mm[:ss]]` in seconds.
    fn hms(&mut self) -> Result<i32, Error> {
        let sign = if self.eat('-') {
            -1
        } else {
            self.eat('+');
            1
        };

        let mut seconds = self.number()?.checked_mul(3600).ok_or_else(|| self.error())?;
        if self.eat(':') {
            let minutes = self.number()?.checked_mul(60).ok_or_else(|| self.error())?;
            seconds = seconds.checked_add(minutes).ok_or_else(|| self.error())?;
            if self.eat(':') {
                let rest = self.number()?;
                seconds = seconds.checked_add(rest).ok_or_else(|| self.error())?;
            }
        }

        i32::try_from(seconds).map(|seconds| sign * seconds).map_err(|_| self.error())
    }

    fn offset(&self, seconds_east: i32) -> Result<FixedOffset, Error> {
        FixedOffset::east_opt(seconds_east).ok_or_else(|| self.error())
    }

    fn date_rule(&mut self) -> Result<DateRule, Error> {
        self.expect('M')?;
        let month = self.number()?;
        self.expect('.')?;
        let week = self.number()?;
        self.expect('.')?;
        let weekday = self.number()?;

        if !(1..=12).contains(&month) || !(1..=5).contains(&week) || weekday > 6 {
            return Err(self.error());
        }

        let time = if self.eat('/') { self.hms()? } else { 2 * 3600 };

        Ok(DateRule {
            month,
            week,
            weekday,
            time,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

    use crate::zone::dst::{DstTable, Period, Transition};
    use crate::zone::{Fold, Timezone};
    use crate::Error;

    const EASTERN: &str = "EST5EDT,M3.2.0,M11.1.0";

    fn civil(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        civil(y, m, d, h, min).and_utc()
    }

    fn eastern() -> DstTable {
        DstTable::from_posix(EASTERN, 2010..=2020).unwrap()
    }

    #[test]
    fn it_should_place_the_us_transitions_of_2018() {
        let table = eastern();

        assert!(!table.period_at(&utc(2018, 3, 11, 6, 59)).is_dst);
        assert!(table.period_at(&utc(2018, 3, 11, 7, 0)).is_dst);
        assert!(table.period_at(&utc(2018, 11, 4, 5, 59)).is_dst);
        assert!(!table.period_at(&utc(2018, 11, 4, 6, 0)).is_dst);
    }

    #[test]
    fn it_should_name_the_periods_after_the_rule() {
        let table = eastern();

        assert_eq!(table.period_at(&utc(2018, 1, 1, 0, 0)).abbreviation, "EST");
        assert_eq!(table.period_at(&utc(2018, 7, 1, 0, 0)).abbreviation, "EDT");
        assert_eq!(table.name(), EASTERN);
    }

    #[test]
    fn it_should_start_in_standard_time_before_the_first_transition() {
        let table = eastern();

        assert_eq!(table.period_at(&utc(1999, 7, 1, 0, 0)).offset, FixedOffset::west_opt(5 * 3600).unwrap());
    }

    #[test]
    fn localizing_an_unambiguous_time_should_ignore_the_dst_hint() {
        let table = eastern();
        let new_year = civil(2014, 1, 1, 0, 0);

        assert_eq!(table.localize(&new_year, true).unwrap(), utc(2014, 1, 1, 5, 0));
        assert_eq!(table.localize(&new_year, false).unwrap(), utc(2014, 1, 1, 5, 0));
    }

    #[test]
    fn localizing_a_repeated_time_should_follow_the_dst_hint() {
        let table = eastern();
        let repeated = civil(2018, 11, 4, 1, 30);

        assert_eq!(table.localize(&repeated, true).unwrap().timestamp(), 1_541_309_400);
        assert_eq!(table.localize(&repeated, false).unwrap().timestamp(), 1_541_313_000);
    }

    #[test]
    fn the_fold_should_pick_the_earlier_or_later_instant_of_a_repeated_time() {
        let table = eastern();
        let repeated = civil(2018, 11, 4, 1, 30);

        assert_eq!(table.attach(&repeated, Fold::Earlier).unwrap().timestamp(), 1_541_309_400);
        assert_eq!(table.attach(&repeated, Fold::Later).unwrap().timestamp(), 1_541_313_000);
    }

    #[test]
    fn the_fold_should_pick_the_earlier_or_later_instant_of_a_skipped_time() {
        let table = eastern();
        let skipped = civil(2018, 3, 11, 2, 30);

        assert_eq!(table.attach(&skipped, Fold::Earlier).unwrap(), utc(2018, 3, 11, 6, 30));
        assert_eq!(table.attach(&skipped, Fold::Later).unwrap(), utc(2018, 3, 11, 7, 30));
    }

    #[test]
    fn the_dst_state_from_fold_should_not_depend_on_the_transition_direction() {
        let table = eastern();

        // Earlier means "inside DST" for the repeated hour of November and for
        // the skipped hour of March alike.
        assert!(table.dst_from_fold(&civil(2018, 11, 4, 1, 30), Fold::Earlier).unwrap());
        assert!(table.dst_from_fold(&civil(2018, 3, 11, 2, 30), Fold::Earlier).unwrap());
        assert!(!table.dst_from_fold(&civil(2018, 11, 4, 1, 30), Fold::Later).unwrap());
        assert!(!table.dst_from_fold(&civil(2018, 3, 11, 2, 30), Fold::Later).unwrap());
    }

    #[test]
    fn a_southern_hemisphere_rule_should_start_in_daylight_time() {
        // Australia/Sydney: DST from the first Sunday of October to the first Sunday of April.
        let sydney = DstTable::from_posix("AEST-10AEDT,M10.1.0,M4.1.0/3", 2018..=2019).unwrap();

        assert!(sydney.period_at(&utc(2018, 1, 15, 0, 0)).is_dst);
        assert!(!sydney.period_at(&utc(2018, 6, 15, 0, 0)).is_dst);
        assert_eq!(sydney.offset_at(&utc(2018, 6, 15, 0, 0)), FixedOffset::east_opt(10 * 3600).unwrap());
    }

    #[test]
    fn a_rule_without_dst_should_give_a_single_period() {
        let table = DstTable::from_posix("<+0530>-5:30", 2018..=2019).unwrap();

        assert_eq!(table.offset_at(&utc(2018, 6, 1, 0, 0)), FixedOffset::east_opt(5 * 3600 + 1800).unwrap());
        assert_eq!(table.period_at(&utc(2018, 6, 1, 0, 0)).abbreviation, "+0530");
    }

    #[test]
    fn an_unsupported_rule_should_be_rejected() {
        for rule in [
            "",
            "E5",
            "EST5EDT,J60,J300",
            "EST5EDT,M13.1.0,M11.1.0",
            "EST5EDT,M3.2.0",
            "EST9999999",
            "EST5EDT,M3.2.0/9999999,M11.1.0",
            "EST5:9999999999",
        ] {
            assert_eq!(
                DstTable::from_posix(rule, 2018..=2018),
                Err(Error::InvalidPosixRule(rule.to_owned()))
            );
        }
    }

    /// Standard offset `+00:00`, `+01:00` from April to October 2018, neither
    /// of them daylight time.
    fn offset_changes_without_dst() -> DstTable {
        let period = |hours: i32| Period {
            offset: FixedOffset::east_opt(hours * 3600).unwrap(),
            is_dst: false,
            abbreviation: String::new(),
        };

        let transitions = vec![
            Transition {
                at: utc(2018, 4, 1, 0, 0),
                period: period(1),
            },
            Transition {
                at: utc(2018, 10, 1, 0, 0),
                period: period(0),
            },
        ];

        DstTable::new("Shifting", period(0), transitions).unwrap()
    }

    #[test]
    fn the_fold_should_pick_a_repeated_time_when_both_readings_are_standard_time() {
        let table = offset_changes_without_dst();
        let repeated = civil(2018, 10, 1, 0, 30);

        assert_eq!(table.attach(&repeated, Fold::Earlier).unwrap(), utc(2018, 9, 30, 23, 30));
        assert_eq!(table.attach(&repeated, Fold::Later).unwrap(), utc(2018, 10, 1, 0, 30));
    }

    #[test]
    fn the_fold_should_pick_a_skipped_time_when_both_readings_are_standard_time() {
        let table = offset_changes_without_dst();
        let skipped = civil(2018, 4, 1, 0, 30);

        assert_eq!(table.attach(&skipped, Fold::Earlier).unwrap(), utc(2018, 3, 31, 23, 30));
        assert_eq!(table.attach(&skipped, Fold::Later).unwrap(), utc(2018, 4, 1, 0, 30));
    }

    #[test]
    fn transitions_out_of_order_should_be_rejected() {
        let period = |hours: i32, is_dst: bool| Period {
            offset: FixedOffset::east_opt(hours * 3600).unwrap(),
            is_dst,
            abbreviation: String::new(),
        };

        let transitions = vec![
            Transition {
                at: utc(2018, 10, 1, 0, 0),
                period: period(0, false),
            },
            Transition {
                at: utc(2018, 4, 1, 0, 0),
                period: period(1, true),
            },
        ];

        assert_eq!(
            DstTable::new("Broken", period(0, false), transitions),
            Err(Error::InvalidTransitions)
        );
    }
}
