// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! A time of day fixed to a specific offset from UTC.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::error::Error;
use crate::format;
use crate::offset::ZoneOffset;
use crate::time::Time;

/// A time with an offset from UTC, such as `13:45:30+02:00`.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub struct OffsetTime {
    time: Time,
    offset: ZoneOffset,
}

impl OffsetTime {
    /// Combines a time with an offset.
    #[inline]
    pub const fn new(time: Time, offset: ZoneOffset) -> OffsetTime {
        OffsetTime { time, offset }
    }

    /// The time part.
    #[inline]
    pub const fn time(&self) -> Time {
        self.time
    }

    /// The offset part.
    #[inline]
    pub const fn offset(&self) -> ZoneOffset {
        self.offset
    }

    /// The UTC-equivalent nanosecond position used for ordering. This can be
    /// negative or beyond the day for extreme offsets; only the relative
    /// order matters.
    fn utc_nano(&self) -> i64 {
        self.time.nano_of_day() - self.offset.total_seconds() as i64 * 1_000_000_000
    }
}

impl Ord for OffsetTime {
    /// Orders by the UTC-equivalent time first, then by the local time,
    /// keeping the ordering consistent with equality.
    fn cmp(&self, other: &OffsetTime) -> Ordering {
        self.utc_nano().cmp(&other.utc_nano()).then_with(|| self.time.cmp(&other.time))
    }
}

impl PartialOrd for OffsetTime {
    fn partial_cmp(&self, other: &OffsetTime) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OffsetTime {
    /// ISO-8601 form `{time}{offset}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.time, self.offset)
    }
}

impl FromStr for OffsetTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<OffsetTime, Error> {
        format::parse_offset_time(s)
    }
}

#[cfg(test)]
mod tests {
    use super::OffsetTime;
    use crate::offset::ZoneOffset;
    use crate::time::Time;

    fn ot(h: i64, m: i64, offset_hours: i64) -> OffsetTime {
        OffsetTime::new(Time::of(h, m).unwrap(), ZoneOffset::of_hours(offset_hours).unwrap())
    }

    #[test]
    fn test_ordering_by_utc_equivalent() {
        // 12:00+02:00 is 10:00 UTC; 11:00Z is 11:00 UTC
        assert!(ot(12, 0, 2) < ot(11, 0, 0));
        // same UTC position, tie broken by local time
        assert!(ot(10, 0, 0) < ot(12, 0, 2));
        assert_ne!(ot(10, 0, 0), ot(12, 0, 2));
    }

    #[test]
    fn test_display_round_trip() {
        let value = ot(13, 45, 2);
        assert_eq!(value.to_string(), "13:45+02:00");
        assert_eq!(value.to_string().parse::<OffsetTime>().unwrap(), value);

        let with_secs = OffsetTime::new(
            Time::of_hms_nano(13, 45, 30, 500_000_000).unwrap(),
            ZoneOffset::of_hours_minutes(-5, -30).unwrap(),
        );
        assert_eq!(with_secs.to_string(), "13:45:30.500-05:30");
        assert_eq!(with_secs.to_string().parse::<OffsetTime>().unwrap(), with_secs);
    }
}
