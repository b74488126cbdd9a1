// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! An exact, machine-scale span of elapsed time.

use core::fmt;
use core::ops::Neg;

use num_integer::Integer;

use crate::error::Error;
use crate::instant::Instant;

pub(crate) const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// An exact elapsed-time quantity, measured in seconds and nanoseconds.
///
/// A `Duration` measures physical elapsed time. It is distinct from
/// [`Period`](crate::Period), which counts calendar fields: a `Period` of one
/// month has no fixed length in seconds, while a `Duration` always does.
///
/// The representation is a whole number of seconds plus a nanosecond
/// adjustment in `[0, 999_999_999]`. A negative duration therefore carries a
/// negative `seconds` value with the nanoseconds still counting forward:
/// minus half a second is `seconds == -1, nanos == 500_000_000`.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub struct Duration {
    secs: i64,
    nanos: u32,
}

impl Duration {
    /// A duration of zero length.
    pub const ZERO: Duration = Duration { secs: 0, nanos: 0 };

    /// Makes a `Duration` from a whole number of seconds.
    #[inline]
    pub const fn of_seconds(secs: i64) -> Duration {
        Duration { secs, nanos: 0 }
    }

    /// Makes a `Duration` from seconds and a nanosecond adjustment of any
    /// sign, normalizing the nanoseconds into `[0, 999_999_999]`.
    ///
    /// Fails when the normalized seconds overflow an `i64`.
    pub fn of_seconds_adjusted(secs: i64, nano_adjustment: i64) -> Result<Duration, Error> {
        let (carry, nanos) = nano_adjustment.div_mod_floor(&(NANOS_PER_SECOND as i64));
        let secs = secs.checked_add(carry).ok_or_else(|| Error::overflow("duration seconds"))?;
        Ok(Duration { secs, nanos: nanos as u32 })
    }

    /// Makes a `Duration` from a number of milliseconds.
    pub fn of_millis(millis: i64) -> Duration {
        let (secs, millis) = millis.div_mod_floor(&1000);
        Duration { secs, nanos: millis as u32 * 1_000_000 }
    }

    /// Makes a `Duration` from a number of nanoseconds.
    pub fn of_nanos(nanos: i64) -> Duration {
        let (secs, nanos) = nanos.div_mod_floor(&(NANOS_PER_SECOND as i64));
        Duration { secs, nanos: nanos as u32 }
    }

    /// The exact duration between two instants, possibly negative.
    pub fn between(start: Instant, end: Instant) -> Result<Duration, Error> {
        let secs = end
            .epoch_seconds()
            .checked_sub(start.epoch_seconds())
            .ok_or_else(|| Error::overflow("duration between instants"))?;
        let nanos = end.nano_of_second() as i64 - start.nano_of_second() as i64;
        Duration::of_seconds_adjusted(secs, nanos)
    }

    /// The whole-seconds part, rounded towards negative infinity.
    #[inline]
    pub const fn seconds(&self) -> i64 {
        self.secs
    }

    /// The nanosecond adjustment, `0..=999_999_999`.
    #[inline]
    pub const fn subsec_nanos(&self) -> u32 {
        self.nanos
    }

    /// True when this duration has zero length.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.secs == 0 && self.nanos == 0
    }

    /// True when this duration is strictly negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.secs < 0
    }

    /// The total length in nanoseconds, exact in an `i128`.
    pub fn total_nanos(&self) -> i128 {
        self.secs as i128 * NANOS_PER_SECOND as i128 + self.nanos as i128
    }

    /// Adds another duration, failing on `i64` seconds overflow.
    pub fn plus(&self, other: Duration) -> Result<Duration, Error> {
        let secs = self
            .secs
            .checked_add(other.secs)
            .ok_or_else(|| Error::overflow("duration seconds"))?;
        Duration::of_seconds_adjusted(secs, self.nanos as i64 + other.nanos as i64)
    }

    /// Subtracts another duration, failing on `i64` seconds overflow.
    pub fn minus(&self, other: Duration) -> Result<Duration, Error> {
        let secs = self
            .secs
            .checked_sub(other.secs)
            .ok_or_else(|| Error::overflow("duration seconds"))?;
        Duration::of_seconds_adjusted(secs, self.nanos as i64 - other.nanos as i64)
    }

    /// Multiplies by a scalar, failing on overflow.
    pub fn multiplied_by(&self, scalar: i64) -> Result<Duration, Error> {
        let total = self
            .total_nanos()
            .checked_mul(scalar as i128)
            .ok_or_else(|| Error::overflow("duration multiplication"))?;
        let secs = total.div_euclid(NANOS_PER_SECOND as i128);
        let nanos = total.rem_euclid(NANOS_PER_SECOND as i128) as u32;
        if secs < i64::MIN as i128 || secs > i64::MAX as i128 {
            return Err(Error::overflow("duration multiplication"));
        }
        Ok(Duration { secs: secs as i64, nanos })
    }

    /// Negates, failing only for the most negative representable duration.
    pub fn negated(&self) -> Result<Duration, Error> {
        Duration::ZERO.minus(*self)
    }
}

impl Neg for Duration {
    type Output = Duration;

    /// Panicking negation, for the common case away from `i64::MIN` seconds.
    fn neg(self) -> Duration {
        self.negated().expect("duration negation overflowed")
    }
}

impl fmt::Display for Duration {
    /// ISO-8601 seconds-based form, such as `PT8.5S` or `PT-0.5S`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total_nanos();
        let (sign, abs) = if total < 0 { ("-", -total) } else { ("", total) };
        let secs = abs / NANOS_PER_SECOND as i128;
        let nanos = (abs % NANOS_PER_SECOND as i128) as u32;
        if nanos == 0 {
            write!(f, "PT{}{}S", sign, secs)
        } else if nanos % 1_000_000 == 0 {
            write!(f, "PT{}{}.{:03}S", sign, secs, nanos / 1_000_000)
        } else if nanos % 1_000 == 0 {
            write!(f, "PT{}{}.{:06}S", sign, secs, nanos / 1_000)
        } else {
            write!(f, "PT{}{}.{:09}S", sign, secs, nanos)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Duration;
    use crate::instant::Instant;

    #[test]
    fn test_normalization() {
        let d = Duration::of_seconds_adjusted(3, 1_500_000_000).unwrap();
        assert_eq!(d.seconds(), 4);
        assert_eq!(d.subsec_nanos(), 500_000_000);

        let d = Duration::of_seconds_adjusted(3, -500_000_000).unwrap();
        assert_eq!(d.seconds(), 2);
        assert_eq!(d.subsec_nanos(), 500_000_000);

        let d = Duration::of_nanos(-1);
        assert_eq!(d.seconds(), -1);
        assert_eq!(d.subsec_nanos(), 999_999_999);
        assert!(d.is_negative());
    }

    #[test]
    fn test_millis() {
        assert_eq!(Duration::of_millis(1500).seconds(), 1);
        assert_eq!(Duration::of_millis(1500).subsec_nanos(), 500_000_000);
        assert_eq!(Duration::of_millis(-1).seconds(), -1);
        assert_eq!(Duration::of_millis(-1).subsec_nanos(), 999_000_000);
    }

    #[test]
    fn test_arithmetic() {
        let a = Duration::of_seconds_adjusted(1, 800_000_000).unwrap();
        let b = Duration::of_seconds_adjusted(0, 300_000_000).unwrap();
        let sum = a.plus(b).unwrap();
        assert_eq!((sum.seconds(), sum.subsec_nanos()), (2, 100_000_000));
        let diff = a.minus(b).unwrap();
        assert_eq!((diff.seconds(), diff.subsec_nanos()), (1, 500_000_000));

        assert!(Duration::of_seconds(i64::MAX).plus(Duration::of_seconds(1)).is_err());

        let tripled = b.multiplied_by(3).unwrap();
        assert_eq!((tripled.seconds(), tripled.subsec_nanos()), (0, 900_000_000));
        assert_eq!(b.multiplied_by(-1).unwrap(), b.negated().unwrap());
    }

    #[test]
    fn test_between() {
        let a = Instant::from_epoch_seconds_adjusted(10, 500_000_000).unwrap();
        let b = Instant::from_epoch_seconds_adjusted(12, 250_000_000).unwrap();
        let d = Duration::between(a, b).unwrap();
        assert_eq!((d.seconds(), d.subsec_nanos()), (1, 750_000_000));
        let d = Duration::between(b, a).unwrap();
        assert_eq!((d.seconds(), d.subsec_nanos()), (-2, 250_000_000));
    }

    #[test]
    fn test_display() {
        assert_eq!(Duration::ZERO.to_string(), "PT0S");
        assert_eq!(Duration::of_seconds(90).to_string(), "PT90S");
        assert_eq!(Duration::of_millis(8500).to_string(), "PT8.500S");
        assert_eq!(Duration::of_millis(-500).to_string(), "PT-0.500S");
        assert_eq!(Duration::of_nanos(1).to_string(), "PT0.000000001S");
    }
}
