// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! A date-time fixed to a specific offset from UTC.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::Error;
use crate::format;
use crate::instant::Instant;
use crate::offset::ZoneOffset;
use crate::period::Period;

/// A date-time with a resolved offset from UTC, such as
/// `2020-02-29T13:45+02:00`.
///
/// Unlike [`ZonedDateTime`](crate::ZonedDateTime) this type knows nothing of
/// daylight-saving rules; the offset is simply part of the value.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub struct OffsetDateTime {
    datetime: DateTime,
    offset: ZoneOffset,
}

impl OffsetDateTime {
    /// Combines a local date-time with an offset.
    #[inline]
    pub const fn new(datetime: DateTime, offset: ZoneOffset) -> OffsetDateTime {
        OffsetDateTime { datetime, offset }
    }

    /// Makes an `OffsetDateTime` for the given instant at the given offset.
    pub fn from_instant(instant: Instant, offset: ZoneOffset) -> Result<OffsetDateTime, Error> {
        let datetime =
            DateTime::from_epoch_second(instant.epoch_seconds(), instant.nano_of_second(), offset)?;
        Ok(OffsetDateTime { datetime, offset })
    }

    /// The local date-time part.
    #[inline]
    pub const fn datetime(&self) -> DateTime {
        self.datetime
    }

    /// The offset part.
    #[inline]
    pub const fn offset(&self) -> ZoneOffset {
        self.offset
    }

    /// The instant this value represents.
    pub fn to_instant(&self) -> Instant {
        Instant::from_epoch_seconds_adjusted(
            self.datetime.to_epoch_second(self.offset),
            self.datetime.time().nano() as i64,
        )
        .expect("epoch second of a valid date-time fits")
    }

    /// Returns the same instant expressed at a different offset.
    pub fn with_offset_same_instant(&self, offset: ZoneOffset) -> Result<OffsetDateTime, Error> {
        OffsetDateTime::from_instant(self.to_instant(), offset)
    }

    /// Returns the same local date-time stamped with a different offset.
    /// This changes the instant.
    pub const fn with_offset_same_local(&self, offset: ZoneOffset) -> OffsetDateTime {
        OffsetDateTime { datetime: self.datetime, offset }
    }

    /// Adds a period to the local date-time, keeping the offset.
    pub fn plus_period(&self, period: &Period) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime { datetime: self.datetime.plus_period(period)?, offset: self.offset })
    }

    /// Adds an exact duration, keeping the offset.
    pub fn plus_duration(&self, duration: Duration) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime { datetime: self.datetime.plus_duration(duration)?, offset: self.offset })
    }
}

impl Ord for OffsetDateTime {
    /// Orders by the represented instant first, then by the local date-time,
    /// keeping the ordering consistent with equality.
    fn cmp(&self, other: &OffsetDateTime) -> Ordering {
        self.to_instant()
            .cmp(&other.to_instant())
            .then_with(|| self.datetime.cmp(&other.datetime))
    }
}

impl PartialOrd for OffsetDateTime {
    fn partial_cmp(&self, other: &OffsetDateTime) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OffsetDateTime {
    /// ISO-8601 form `{datetime}{offset}`, such as
    /// `2020-02-29T13:45+02:00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.datetime, self.offset)
    }
}

impl FromStr for OffsetDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<OffsetDateTime, Error> {
        format::parse_offset_datetime(s)
    }
}

#[cfg(test)]
mod tests {
    use super::OffsetDateTime;
    use crate::date::Date;
    use crate::datetime::DateTime;
    use crate::instant::Instant;
    use crate::offset::ZoneOffset;
    use crate::time::Time;

    fn odt(y: i32, mo: i64, d: i64, h: i64, mi: i64, offset_hours: i64) -> OffsetDateTime {
        OffsetDateTime::new(
            DateTime::new(Date::from_ymd(y, mo, d).unwrap(), Time::of(h, mi).unwrap()),
            ZoneOffset::of_hours(offset_hours).unwrap(),
        )
    }

    #[test]
    fn test_instant_conversion() {
        let utc = odt(1970, 1, 1, 0, 0, 0);
        assert_eq!(utc.to_instant(), Instant::EPOCH);

        let plus_two = odt(1970, 1, 1, 2, 0, 2);
        assert_eq!(plus_two.to_instant(), Instant::EPOCH);

        let shifted = utc.with_offset_same_instant(ZoneOffset::of_hours(2).unwrap()).unwrap();
        assert_eq!(shifted, plus_two);
        assert_eq!(shifted.datetime().time(), Time::of(2, 0).unwrap());
    }

    #[test]
    fn test_ordering_by_instant_then_local() {
        // same instant, different local representations
        let a = odt(1970, 1, 1, 0, 0, 0);
        let b = odt(1970, 1, 1, 2, 0, 2);
        assert_eq!(a.to_instant(), b.to_instant());
        assert!(a < b); // earlier local date-time breaks the tie
        assert_ne!(a, b);

        let earlier = odt(1970, 1, 1, 0, 0, 2);
        assert!(earlier < a);
    }

    #[test]
    fn test_same_local_changes_instant() {
        let a = odt(2020, 6, 1, 12, 0, 0);
        let b = a.with_offset_same_local(ZoneOffset::of_hours(3).unwrap());
        assert_eq!(b.datetime(), a.datetime());
        assert_eq!(
            b.to_instant().epoch_seconds(),
            a.to_instant().epoch_seconds() - 3 * 3600
        );
    }

    #[test]
    fn test_display_round_trip() {
        let value = odt(2020, 2, 29, 13, 45, 2);
        assert_eq!(value.to_string(), "2020-02-29T13:45+02:00");
        assert_eq!(value.to_string().parse::<OffsetDateTime>().unwrap(), value);

        let zulu = odt(2020, 2, 29, 13, 45, 0);
        assert_eq!(zulu.to_string(), "2020-02-29T13:45Z");
        assert_eq!(zulu.to_string().parse::<OffsetDateTime>().unwrap(), zulu);
    }
}
