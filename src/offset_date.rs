// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! A date fixed to a specific offset from UTC.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::date::Date;
use crate::error::Error;
use crate::format;
use crate::instant::SECONDS_PER_DAY;
use crate::offset::ZoneOffset;

/// A date with an offset from UTC, such as `2020-02-29+02:00`.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub struct OffsetDate {
    date: Date,
    offset: ZoneOffset,
}

impl OffsetDate {
    /// Combines a date with an offset.
    #[inline]
    pub const fn new(date: Date, offset: ZoneOffset) -> OffsetDate {
        OffsetDate { date, offset }
    }

    /// The date part.
    #[inline]
    pub const fn date(&self) -> Date {
        self.date
    }

    /// The offset part.
    #[inline]
    pub const fn offset(&self) -> ZoneOffset {
        self.offset
    }

    /// The epoch second of midnight at the start of this date at its offset.
    /// This is the UTC-equivalent point used for ordering.
    pub fn epoch_second_at_midnight(&self) -> i64 {
        self.date.to_epoch_day() * SECONDS_PER_DAY - self.offset.total_seconds() as i64
    }
}

impl Ord for OffsetDate {
    /// Orders by the UTC-equivalent instant of midnight first, then by the
    /// local date, keeping the ordering consistent with equality.
    fn cmp(&self, other: &OffsetDate) -> Ordering {
        self.epoch_second_at_midnight()
            .cmp(&other.epoch_second_at_midnight())
            .then_with(|| self.date.cmp(&other.date))
    }
}

impl PartialOrd for OffsetDate {
    fn partial_cmp(&self, other: &OffsetDate) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OffsetDate {
    /// ISO-8601 form `{date}{offset}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.date, self.offset)
    }
}

impl FromStr for OffsetDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<OffsetDate, Error> {
        format::parse_offset_date(s)
    }
}

#[cfg(test)]
mod tests {
    use super::OffsetDate;
    use crate::date::Date;
    use crate::offset::ZoneOffset;

    fn od(y: i32, m: i64, d: i64, offset_hours: i64) -> OffsetDate {
        OffsetDate::new(
            Date::from_ymd(y, m, d).unwrap(),
            ZoneOffset::of_hours(offset_hours).unwrap(),
        )
    }

    #[test]
    fn test_ordering_by_utc_midnight() {
        // midnight in +02:00 happens before midnight in Z on the same date
        assert!(od(2020, 1, 1, 2) < od(2020, 1, 1, 0));
        // 2020-01-02+12:00 starts before 2020-01-01-13:00
        assert!(od(2020, 1, 2, 12) < od(2020, 1, 1, -13));
        assert!(od(2020, 1, 1, 0) < od(2020, 1, 2, 0));
    }

    #[test]
    fn test_display_round_trip() {
        let value = od(2020, 2, 29, -5);
        assert_eq!(value.to_string(), "2020-02-29-05:00");
        assert_eq!(value.to_string().parse::<OffsetDate>().unwrap(), value);

        let zulu = od(2020, 2, 29, 0);
        assert_eq!(zulu.to_string(), "2020-02-29Z");
        assert_eq!(zulu.to_string().parse::<OffsetDate>().unwrap(), zulu);
    }
}
