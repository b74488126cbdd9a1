// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! An instantaneous point on the UTC-SLS time-line.

use core::fmt;
use core::str::FromStr;

use num_integer::Integer;

use crate::date::Date;
use crate::duration::{Duration, NANOS_PER_SECOND};
use crate::error::Error;
use crate::format;

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// An instantaneous point on the time-line, in the UTC-SLS time-scale.
///
/// The time-scale runs at exactly 86 400 seconds per day; leap seconds are
/// ignored by design. The representation is seconds from the epoch of
/// 1970-01-01T00:00:00Z plus a nanosecond-of-second in `[0, 999_999_999]`.
/// The normalized form is canonical: two instants are equal exactly when
/// both fields are equal.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub struct Instant {
    secs: i64,
    nanos: u32,
}

impl Instant {
    /// The epoch instant, 1970-01-01T00:00:00Z.
    pub const EPOCH: Instant = Instant { secs: 0, nanos: 0 };

    /// Makes an `Instant` from a whole number of seconds from the epoch.
    #[inline]
    pub const fn from_epoch_seconds(secs: i64) -> Instant {
        Instant { secs, nanos: 0 }
    }

    /// Makes an `Instant` from seconds from the epoch and a nanosecond
    /// adjustment of any sign.
    ///
    /// The nanoseconds are normalized into `[0, 999_999_999]` with floored
    /// division, so `from_epoch_seconds_adjusted(s, n)` equals
    /// `from_epoch_seconds_adjusted(s + n.div_euclid(1e9), n.rem_euclid(1e9))`
    /// for every `n`. Fails when the normalized seconds overflow.
    pub fn from_epoch_seconds_adjusted(secs: i64, nano_adjustment: i64) -> Result<Instant, Error> {
        let (carry, nanos) = nano_adjustment.div_mod_floor(&(NANOS_PER_SECOND as i64));
        let secs = secs.checked_add(carry).ok_or_else(|| Error::overflow("instant seconds"))?;
        Ok(Instant { secs, nanos: nanos as u32 })
    }

    /// Makes an `Instant` from milliseconds from the epoch.
    pub fn from_epoch_millis(millis: i64) -> Instant {
        let (secs, millis) = millis.div_mod_floor(&1000);
        Instant { secs, nanos: millis as u32 * 1_000_000 }
    }

    /// Makes an `Instant` from nanoseconds from the epoch.
    pub fn from_epoch_nanos(nanos: i64) -> Instant {
        let (secs, nanos) = nanos.div_mod_floor(&(NANOS_PER_SECOND as i64));
        Instant { secs, nanos: nanos as u32 }
    }

    /// Seconds from the epoch, rounded towards negative infinity.
    #[inline]
    pub const fn epoch_seconds(&self) -> i64 {
        self.secs
    }

    /// The nanosecond-of-second, `0..=999_999_999`.
    #[inline]
    pub const fn nano_of_second(&self) -> u32 {
        self.nanos
    }

    /// Adds a duration, failing on overflow.
    pub fn plus(&self, duration: Duration) -> Result<Instant, Error> {
        let secs = self
            .secs
            .checked_add(duration.seconds())
            .ok_or_else(|| Error::overflow("instant seconds"))?;
        Instant::from_epoch_seconds_adjusted(
            secs,
            self.nanos as i64 + duration.subsec_nanos() as i64,
        )
    }

    /// Subtracts a duration, failing on overflow.
    pub fn minus(&self, duration: Duration) -> Result<Instant, Error> {
        let secs = self
            .secs
            .checked_sub(duration.seconds())
            .ok_or_else(|| Error::overflow("instant seconds"))?;
        Instant::from_epoch_seconds_adjusted(
            secs,
            self.nanos as i64 - duration.subsec_nanos() as i64,
        )
    }

    /// Adds a whole number of seconds, failing on overflow.
    pub fn plus_seconds(&self, secs: i64) -> Result<Instant, Error> {
        let secs = self.secs.checked_add(secs).ok_or_else(|| Error::overflow("instant seconds"))?;
        Ok(Instant { secs, nanos: self.nanos })
    }

    /// Adds a number of nanoseconds, failing on overflow.
    pub fn plus_nanos(&self, nanos: i64) -> Result<Instant, Error> {
        Instant::from_epoch_seconds_adjusted(self.secs, self.nanos as i64 + nanos)
    }
}

impl fmt::Display for Instant {
    /// ISO-8601 UTC form with full nanosecond precision, such as
    /// `2020-02-29T12:30:00.000000005Z`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (days, second_of_day) = self.secs.div_mod_floor(&SECONDS_PER_DAY);
        let date = match Date::from_epoch_day(days) {
            Ok(date) => date,
            Err(_) => return Err(fmt::Error),
        };
        let (hour, rem) = (second_of_day / 3600, second_of_day % 3600);
        write!(
            f,
            "{}T{:02}:{:02}:{:02}.{:09}Z",
            date,
            hour,
            rem / 60,
            rem % 60,
            self.nanos
        )
    }
}

impl FromStr for Instant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Instant, Error> {
        format::parse_instant(s)
    }
}

#[cfg(test)]
mod tests {
    use super::Instant;

    #[test]
    fn test_normalization_idempotence() {
        for &(secs, nanos) in &[
            (0i64, 0i64),
            (0, 1_000_000_001),
            (0, -1),
            (5, 2_999_999_999),
            (-5, -2_000_000_001),
            (100, 999_999_999),
        ] {
            let a = Instant::from_epoch_seconds_adjusted(secs, nanos).unwrap();
            let b = Instant::from_epoch_seconds_adjusted(
                secs + nanos.div_euclid(1_000_000_000),
                nanos.rem_euclid(1_000_000_000),
            )
            .unwrap();
            assert_eq!(a, b, "({}, {})", secs, nanos);
            assert!(a.nano_of_second() < 1_000_000_000);
        }
    }

    #[test]
    fn test_ordering() {
        let a = Instant::from_epoch_seconds_adjusted(3, 500).unwrap();
        let b = Instant::from_epoch_seconds_adjusted(3, 501).unwrap();
        let c = Instant::from_epoch_seconds(4);
        assert!(a < b && b < c);
        assert_eq!(a, Instant::from_epoch_seconds_adjusted(2, 1_000_000_500).unwrap());
    }

    #[test]
    fn test_arithmetic() {
        use crate::duration::Duration;

        let i = Instant::from_epoch_seconds_adjusted(10, 800_000_000).unwrap();
        let j = i.plus(Duration::of_millis(300)).unwrap();
        assert_eq!((j.epoch_seconds(), j.nano_of_second()), (11, 100_000_000));
        let k = j.minus(Duration::of_millis(300)).unwrap();
        assert_eq!(k, i);
        assert!(Instant::from_epoch_seconds(i64::MAX).plus_seconds(1).is_err());
        assert_eq!(i.plus_nanos(-800_000_001).unwrap().nano_of_second(), 999_999_999);
    }

    #[test]
    fn test_display() {
        assert_eq!(Instant::EPOCH.to_string(), "1970-01-01T00:00:00.000000000Z");
        let i = Instant::from_epoch_seconds_adjusted(1_234_567_890, 5).unwrap();
        assert_eq!(i.to_string(), "2009-02-13T23:31:30.000000005Z");
        let i = Instant::from_epoch_seconds(-1);
        assert_eq!(i.to_string(), "1969-12-31T23:59:59.000000000Z");
    }

    #[test]
    fn test_round_trip() {
        for &secs in &[0i64, 1, -1, 951_867_000, -2_208_988_800] {
            let i = Instant::from_epoch_seconds_adjusted(secs, 123_456_789).unwrap();
            assert_eq!(i.to_string().parse::<Instant>().unwrap(), i);
        }
    }
}
