// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! ISO-8601 time of day without a date or time-zone.

use core::fmt;
use core::str::FromStr;

use crate::error::Error;
use crate::format;
use crate::period::Period;

pub(crate) const NANOS_PER_DAY: i128 = 86_400_000_000_000;
const NANOS_PER_HOUR: i128 = 3_600_000_000_000;
const NANOS_PER_MINUTE: i128 = 60_000_000_000;
const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// A time of day with nanosecond precision, such as 13:45:30.123456789.
///
/// All arithmetic wraps around midnight; use the `*_with_overflow` forms to
/// observe the day carry, which is reported explicitly through [`Overflow`]
/// and never dropped.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub struct Time {
    hour: u8,
    minute: u8,
    second: u8,
    nano: u32,
}

/// The result of time arithmetic that may have crossed midnight: the wrapped
/// time and the signed number of days carried.
///
/// Callers pairing a `Time` with a date must apply [`days`](Overflow::days)
/// to the date themselves.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct Overflow {
    /// The wrapped time of day.
    pub time: Time,
    /// The signed day carry.
    pub days: i64,
}

impl Time {
    /// Midnight, 00:00.
    pub const MIDNIGHT: Time = Time { hour: 0, minute: 0, second: 0, nano: 0 };
    /// Noon, 12:00.
    pub const NOON: Time = Time { hour: 12, minute: 0, second: 0, nano: 0 };

    /// Makes a `Time` from an hour and minute.
    pub fn of(hour: i64, minute: i64) -> Result<Time, Error> {
        Time::of_hms_nano(hour, minute, 0, 0)
    }

    /// Makes a `Time` from an hour, minute and second.
    pub fn of_hms(hour: i64, minute: i64, second: i64) -> Result<Time, Error> {
        Time::of_hms_nano(hour, minute, second, 0)
    }

    /// Makes a `Time` from an hour, minute, second and nanosecond, each
    /// validated against its fixed range.
    pub fn of_hms_nano(hour: i64, minute: i64, second: i64, nano: i64) -> Result<Time, Error> {
        if !(0..24).contains(&hour) {
            return Err(Error::out_of_range("hour-of-day", hour, 0, 23));
        }
        if !(0..60).contains(&minute) {
            return Err(Error::out_of_range("minute-of-hour", minute, 0, 59));
        }
        if !(0..60).contains(&second) {
            return Err(Error::out_of_range("second-of-minute", second, 0, 59));
        }
        if !(0..1_000_000_000).contains(&nano) {
            return Err(Error::out_of_range("nano-of-second", nano, 0, 999_999_999));
        }
        Ok(Time { hour: hour as u8, minute: minute as u8, second: second as u8, nano: nano as u32 })
    }

    /// Makes a `Time` from a nanosecond-of-day in `[0, 86_399_999_999_999]`.
    pub fn from_nano_of_day(nano_of_day: i64) -> Result<Time, Error> {
        if !(0..NANOS_PER_DAY as i64).contains(&nano_of_day) {
            return Err(Error::out_of_range(
                "nano-of-day",
                nano_of_day,
                0,
                NANOS_PER_DAY as i64 - 1,
            ));
        }
        let nanos = nano_of_day as i128;
        Ok(Time {
            hour: (nanos / NANOS_PER_HOUR) as u8,
            minute: (nanos % NANOS_PER_HOUR / NANOS_PER_MINUTE) as u8,
            second: (nanos % NANOS_PER_MINUTE / NANOS_PER_SECOND) as u8,
            nano: (nanos % NANOS_PER_SECOND) as u32,
        })
    }

    /// Makes a `Time` from a second-of-day in `[0, 86_399]`.
    pub fn from_second_of_day(second_of_day: i64) -> Result<Time, Error> {
        if !(0..86_400).contains(&second_of_day) {
            return Err(Error::out_of_range("second-of-day", second_of_day, 0, 86_399));
        }
        Ok(Time {
            hour: (second_of_day / 3600) as u8,
            minute: (second_of_day % 3600 / 60) as u8,
            second: (second_of_day % 60) as u8,
            nano: 0,
        })
    }

    /// The hour-of-day, 0 through 23.
    #[inline]
    pub const fn hour(&self) -> u32 {
        self.hour as u32
    }

    /// The minute-of-hour, 0 through 59.
    #[inline]
    pub const fn minute(&self) -> u32 {
        self.minute as u32
    }

    /// The second-of-minute, 0 through 59.
    #[inline]
    pub const fn second(&self) -> u32 {
        self.second as u32
    }

    /// The nano-of-second, 0 through 999,999,999.
    #[inline]
    pub const fn nano(&self) -> u32 {
        self.nano
    }

    /// The second-of-day, 0 through 86,399.
    pub const fn second_of_day(&self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }

    /// The nano-of-day, 0 through 86,399,999,999,999.
    pub const fn nano_of_day(&self) -> i64 {
        self.second_of_day() as i64 * 1_000_000_000 + self.nano as i64
    }

    /// Returns this time with the hour changed.
    pub fn with_hour(&self, hour: i64) -> Result<Time, Error> {
        Time::of_hms_nano(hour, self.minute as i64, self.second as i64, self.nano as i64)
    }

    /// Returns this time with the minute changed.
    pub fn with_minute(&self, minute: i64) -> Result<Time, Error> {
        Time::of_hms_nano(self.hour as i64, minute, self.second as i64, self.nano as i64)
    }

    /// Returns this time with the second changed.
    pub fn with_second(&self, second: i64) -> Result<Time, Error> {
        Time::of_hms_nano(self.hour as i64, self.minute as i64, second, self.nano as i64)
    }

    /// Returns this time with the nano-of-second changed.
    pub fn with_nano(&self, nano: i64) -> Result<Time, Error> {
        Time::of_hms_nano(self.hour as i64, self.minute as i64, self.second as i64, nano)
    }

    /// Adds hours, wrapping around midnight.
    pub fn plus_hours(&self, hours: i64) -> Time {
        self.plus_with_overflow(hours, 0, 0, 0).time
    }

    /// Adds minutes, wrapping around midnight.
    pub fn plus_minutes(&self, minutes: i64) -> Time {
        self.plus_with_overflow(0, minutes, 0, 0).time
    }

    /// Adds seconds, wrapping around midnight.
    pub fn plus_seconds(&self, seconds: i64) -> Time {
        self.plus_with_overflow(0, 0, seconds, 0).time
    }

    /// Adds nanoseconds, wrapping around midnight.
    pub fn plus_nanos(&self, nanos: i64) -> Time {
        self.plus_with_overflow(0, 0, 0, nanos).time
    }

    /// Adds hours, minutes, seconds and nanoseconds, wrapping modulo 24
    /// hours and reporting the signed day carry.
    pub fn plus_with_overflow(
        &self,
        hours: i64,
        minutes: i64,
        seconds: i64,
        nanos: i64,
    ) -> Overflow {
        let delta = hours as i128 * NANOS_PER_HOUR
            + minutes as i128 * NANOS_PER_MINUTE
            + seconds as i128 * NANOS_PER_SECOND
            + nanos as i128;
        let total = self.nano_of_day() as i128 + delta;
        let days = total.div_euclid(NANOS_PER_DAY);
        let time = Time::from_nano_of_day(total.rem_euclid(NANOS_PER_DAY) as i64)
            .expect("nano-of-day reduced into range");
        Overflow { time, days: days as i64 }
    }

    /// Adds the time part of a period, wrapping modulo 24 hours and
    /// reporting the signed day carry. The period's date fields do not
    /// participate.
    pub fn plus_period_with_overflow(&self, period: &Period) -> Overflow {
        self.plus_with_overflow(
            period.hours() as i64,
            period.minutes() as i64,
            period.seconds() as i64,
            period.nanos(),
        )
    }
}

/// The half of the day, AM or PM, numbered 0 and 1.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub enum AmPm {
    /// Midnight up to but not including noon, value 0.
    Am = 0,
    /// Noon up to but not including midnight, value 1.
    Pm = 1,
}

impl AmPm {
    /// Obtains an `AmPm` from its number, AM = 0 and PM = 1.
    pub fn of(number: i64) -> Result<AmPm, Error> {
        match number {
            0 => Ok(AmPm::Am),
            1 => Ok(AmPm::Pm),
            n => Err(Error::out_of_range("am-pm-of-day", n, 0, 1)),
        }
    }

    /// The half of the day an hour-of-day falls in.
    pub const fn of_hour(hour: u32) -> AmPm {
        if hour < 12 {
            AmPm::Am
        } else {
            AmPm::Pm
        }
    }

    /// The number of this value, AM = 0 and PM = 1.
    #[inline]
    pub const fn number(&self) -> u32 {
        *self as u32
    }
}

impl fmt::Display for AmPm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            AmPm::Am => "AM",
            AmPm::Pm => "PM",
        })
    }
}

impl fmt::Display for Time {
    /// ISO-8601 form `HH:mm[:ss[.fff]]` — the shortest form that loses no
    /// precision, with the fraction in groups of three digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)?;
        if self.second != 0 || self.nano != 0 {
            write!(f, ":{:02}", self.second)?;
            if self.nano != 0 {
                if self.nano % 1_000_000 == 0 {
                    write!(f, ".{:03}", self.nano / 1_000_000)?;
                } else if self.nano % 1_000 == 0 {
                    write!(f, ".{:06}", self.nano / 1_000)?;
                } else {
                    write!(f, ".{:09}", self.nano)?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Time {
    type Err = Error;

    fn from_str(s: &str) -> Result<Time, Error> {
        format::parse_time(s)
    }
}

#[cfg(test)]
mod tests {
    use super::Time;
    use crate::period::Period;

    #[test]
    fn test_factories_validate() {
        assert!(Time::of_hms_nano(23, 59, 59, 999_999_999).is_ok());
        assert!(Time::of(24, 0).is_err());
        assert!(Time::of(0, 60).is_err());
        assert!(Time::of_hms(0, 0, 60).is_err());
        assert!(Time::of_hms_nano(0, 0, 0, 1_000_000_000).is_err());
        assert!(Time::of(-1, 0).is_err());
    }

    #[test]
    fn test_nano_of_day_round_trip() {
        for &(h, m, s, n) in &[(0, 0, 0, 0), (12, 0, 0, 0), (23, 59, 59, 999_999_999), (1, 2, 3, 4)]
        {
            let t = Time::of_hms_nano(h, m, s, n).unwrap();
            assert_eq!(Time::from_nano_of_day(t.nano_of_day()).unwrap(), t);
        }
        assert!(Time::from_nano_of_day(-1).is_err());
        assert!(Time::from_nano_of_day(86_400_000_000_000).is_err());
    }

    #[test]
    fn test_overflow_carry() {
        let t = Time::of(23, 30).unwrap();
        let overflow = t.plus_with_overflow(2, 0, 0, 0);
        assert_eq!(overflow.time, Time::of(1, 30).unwrap());
        assert_eq!(overflow.days, 1);

        let overflow = t.plus_with_overflow(0, 30, 0, 0);
        assert_eq!(overflow.time, Time::MIDNIGHT);
        assert_eq!(overflow.days, 1);

        let overflow = Time::MIDNIGHT.plus_with_overflow(0, 0, 0, -1);
        assert_eq!(overflow.time, Time::of_hms_nano(23, 59, 59, 999_999_999).unwrap());
        assert_eq!(overflow.days, -1);

        let overflow = Time::NOON.plus_with_overflow(48, 0, 0, 0);
        assert_eq!(overflow.time, Time::NOON);
        assert_eq!(overflow.days, 2);
    }

    #[test]
    fn test_wrapping_plus() {
        let t = Time::of(23, 30).unwrap();
        assert_eq!(t.plus_hours(2), Time::of(1, 30).unwrap());
        assert_eq!(t.plus_hours(-24), t);
        assert_eq!(t.plus_minutes(45), Time::of(0, 15).unwrap());
        assert_eq!(Time::MIDNIGHT.plus_seconds(-1), Time::of_hms(23, 59, 59).unwrap());
    }

    #[test]
    fn test_plus_period_with_overflow() {
        let t = Time::of(22, 0).unwrap();
        let p = Period::of(5, 2, 1, 3, 0, 0, 0); // date part must not participate
        let overflow = t.plus_period_with_overflow(&p);
        assert_eq!(overflow.time, Time::of(1, 0).unwrap());
        assert_eq!(overflow.days, 1);
    }

    #[test]
    fn test_display_shortest_form() {
        assert_eq!(Time::MIDNIGHT.to_string(), "00:00");
        assert_eq!(Time::of_hms(13, 45, 30).unwrap().to_string(), "13:45:30");
        assert_eq!(Time::of(9, 5).unwrap().to_string(), "09:05");
        assert_eq!(
            Time::of_hms_nano(1, 2, 0, 500_000_000).unwrap().to_string(),
            "01:02:00.500"
        );
        assert_eq!(
            Time::of_hms_nano(1, 2, 3, 123_456_000).unwrap().to_string(),
            "01:02:03.123456"
        );
        assert_eq!(
            Time::of_hms_nano(1, 2, 3, 123_456_789).unwrap().to_string(),
            "01:02:03.123456789"
        );
    }

    #[test]
    fn test_round_trip() {
        for s in &["00:00", "13:45:30", "01:02:03.123456789", "23:59:59.999"] {
            let t = s.parse::<Time>().unwrap();
            assert_eq!(t.to_string(), *s);
            assert_eq!(t.to_string().parse::<Time>().unwrap(), t);
        }
    }
}
