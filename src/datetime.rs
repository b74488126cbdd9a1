// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! ISO-8601 date and time without a time-zone.

use core::fmt;
use core::str::FromStr;

use num_integer::Integer;

use crate::date::Date;
use crate::duration::Duration;
use crate::error::Error;
use crate::format;
use crate::instant::SECONDS_PER_DAY;
use crate::offset::ZoneOffset;
use crate::period::Period;
use crate::time::{Time, NANOS_PER_DAY};

/// A date with a time of day, such as 2020-02-29T13:45:30, without any
/// offset or time-zone.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub struct DateTime {
    date: Date,
    time: Time,
}

impl DateTime {
    /// Combines a date and a time.
    #[inline]
    pub const fn new(date: Date, time: Time) -> DateTime {
        DateTime { date, time }
    }

    /// Makes a `DateTime` from individual fields, validating each.
    pub fn from_fields(
        year: i32,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
    ) -> Result<DateTime, Error> {
        Ok(DateTime { date: Date::from_ymd(year, month, day)?, time: Time::of(hour, minute)? })
    }

    /// The date part.
    #[inline]
    pub const fn date(&self) -> Date {
        self.date
    }

    /// The time part.
    #[inline]
    pub const fn time(&self) -> Time {
        self.time
    }

    /// Returns this date-time with a different time of day.
    #[inline]
    pub const fn with_time(&self, time: Time) -> DateTime {
        DateTime { date: self.date, time }
    }

    /// Adds a period: the date part applies years, then months (clamping the
    /// day-of-month), then days; the time part wraps and its day carry is
    /// folded into the date.
    pub fn plus_period(&self, period: &Period) -> Result<DateTime, Error> {
        let overflow = self.time.plus_period_with_overflow(period);
        let days = (period.days() as i64)
            .checked_add(overflow.days)
            .ok_or_else(|| Error::overflow("days"))?;
        let date = self
            .date
            .plus_years(period.years() as i64)?
            .plus_months(period.months() as i64)?
            .plus_days(days)?;
        Ok(DateTime { date, time: overflow.time })
    }

    /// Subtracts a period.
    pub fn minus_period(&self, period: &Period) -> Result<DateTime, Error> {
        self.plus_period(&period.negated()?)
    }

    /// Adds an exact duration.
    pub fn plus_duration(&self, duration: Duration) -> Result<DateTime, Error> {
        let total = self.time.nano_of_day() as i128
            + duration.seconds() as i128 * 1_000_000_000
            + duration.subsec_nanos() as i128;
        let days = total.div_euclid(NANOS_PER_DAY);
        let time = Time::from_nano_of_day(total.rem_euclid(NANOS_PER_DAY) as i64)
            .expect("nano-of-day reduced into range");
        let days = i64::try_from(days).map_err(|_| Error::overflow("days"))?;
        Ok(DateTime { date: self.date.plus_days(days)?, time })
    }

    /// Subtracts an exact duration.
    pub fn minus_duration(&self, duration: Duration) -> Result<DateTime, Error> {
        self.plus_duration(duration.negated()?)
    }

    /// Adds a number of days exactly.
    pub fn plus_days(&self, days: i64) -> Result<DateTime, Error> {
        Ok(DateTime { date: self.date.plus_days(days)?, time: self.time })
    }

    /// The number of seconds from the epoch when this local date-time is
    /// interpreted at the given offset.
    pub fn to_epoch_second(&self, offset: ZoneOffset) -> i64 {
        self.date.to_epoch_day() * SECONDS_PER_DAY + self.time.second_of_day() as i64
            - offset.total_seconds() as i64
    }

    /// Reconstructs the local date-time at `offset` for an epoch second and
    /// nanosecond adjustment.
    pub fn from_epoch_second(
        epoch_second: i64,
        nano: u32,
        offset: ZoneOffset,
    ) -> Result<DateTime, Error> {
        let local = epoch_second
            .checked_add(offset.total_seconds() as i64)
            .ok_or_else(|| Error::overflow("epoch second"))?;
        let (days, second_of_day) = local.div_mod_floor(&SECONDS_PER_DAY);
        let date = Date::from_epoch_day(days)?;
        let time = Time::from_nano_of_day(second_of_day * 1_000_000_000 + nano as i64)
            .expect("second-of-day reduced into range");
        Ok(DateTime { date, time })
    }
}

impl fmt::Display for DateTime {
    /// ISO-8601 form `{date}T{time}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

impl FromStr for DateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<DateTime, Error> {
        format::parse_datetime(s)
    }
}
