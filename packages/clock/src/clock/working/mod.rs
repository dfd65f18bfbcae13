use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};

use crate::clock::{DateTimeSource, EpochSource};
use crate::conv::convert_from_datetime_utc_to_epoch_seconds;
use crate::zone::Timezone;
use crate::Error;

/// The system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct Working;

impl DateTimeSource for Working {
    fn now_naive(&self) -> Result<NaiveDateTime, Error> {
        Ok(Local::now().naive_local())
    }

    fn now_in(&self, observe: &dyn Timezone) -> Result<DateTime<FixedOffset>, Error> {
        Ok(observe.convert(&Utc::now()))
    }

    fn utcnow(&self) -> Result<NaiveDateTime, Error> {
        Ok(Utc::now().naive_utc())
    }

    fn local(&self) -> Result<DateTime<Local>, Error> {
        Ok(Local::now())
    }

    fn dbg_clock_type(&self) -> String {
        "Working".to_owned()
    }
}

impl EpochSource for Working {
    fn time(&self) -> Result<f64, Error> {
        Ok(convert_from_datetime_utc_to_epoch_seconds(&Utc::now()))
    }

    fn dbg_clock_type(&self) -> String {
        "Working".to_owned()
    }
}
